use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Billing classification not found for catalog item: {item_id}")]
    ClassificationNotFound { item_id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid margin configuration: {0}")]
    InvalidMarginConfig(String),

    #[error("Invalid rounding: {0}")]
    InvalidRounding(String),

    #[error("Arithmetic overflow while computing {context}")]
    Overflow { context: String },

    #[error("Pricing collaborator failed: {0}")]
    Collaborator(String),
}

impl PricingError {
    pub fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow {
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
