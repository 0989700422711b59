/// Rejections of free-text input. The display text is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a value, the input is empty.")]
    EmptyInput,

    #[error("The value is too long, at most {max} characters are allowed.")]
    TooLong { max: usize },

    #[error("Invalid format, please send a number like 12.5 or 12,5.")]
    InvalidFormat,

    #[error("The value cannot be negative.")]
    NegativeValue,
}

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User not found")]
    UserNotFound,

    #[error("Pair not found")]
    PairNotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DealError {
    #[error("Buy price is zero, profit percent cannot be calculated")]
    DivisionByZero,

    #[error("Failed to save deal: {0}")]
    Persistence(#[from] BotError),
}
