use crate::domain::CategoryId;

/// Endpoints of the catalog HTTP API, relative to the configured API base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRoute {
    Categories,
    AllProducts,
    ProductsInCategory(CategoryId),
}

impl CatalogRoute {
    pub fn products_for(category: Option<CategoryId>) -> Self {
        match category {
            Some(category_id) => Self::ProductsInCategory(category_id),
            None => Self::AllProducts,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Categories => "/categories".to_string(),
            Self::AllProducts => "/products".to_string(),
            Self::ProductsInCategory(category_id) => {
                format!("/products/category/{}", category_id.0)
            }
        }
    }

    pub fn url(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.path())
    }
}
