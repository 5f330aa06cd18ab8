use serde::{Deserialize, Serialize};

/// Платформа, из которой пришла запись
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Shopify,
    #[serde(rename = "woocommerce")]
    WooCommerce,
    Magento,
    #[serde(rename = "bigcommerce")]
    BigCommerce,
    /// Создано в самом дашборде
    #[default]
    #[serde(rename = "self")]
    Self_,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Shopify => "shopify",
            Origin::WooCommerce => "woocommerce",
            Origin::Magento => "magento",
            Origin::BigCommerce => "bigcommerce",
            Origin::Self_ => "self",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Origin::Shopify => "Shopify",
            Origin::WooCommerce => "WooCommerce",
            Origin::Magento => "Magento",
            Origin::BigCommerce => "BigCommerce",
            Origin::Self_ => "Dashboard",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
