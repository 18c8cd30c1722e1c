use thiserror::Error;

pub type HashbreakResult<T> = std::result::Result<T, HashbreakError>;

#[derive(Error, Debug)]
pub enum HashbreakError {
    #[error("The charset cannot be empty")]
    EmptyCharset,

    #[error("The charset can only contain ASCII characters")]
    NonAsciiCharset,

    #[error("The charset contains the character {0:?} more than once")]
    DuplicateCharsetChar(char),

    #[error("The charset cannot contain more than {0} characters")]
    CharsetTooLong(usize),

    #[error("The maximum password length must be at least 1")]
    ZeroMaxPasswordLength,

    #[error("The maximum password length cannot exceed {0}")]
    MaxPasswordLengthExceeded(u8),

    #[error("The timeout check interval must be at least 1")]
    ZeroCheckInterval,

    #[error("Hashbreak only supports keyspaces up to 2^64, but the requested space is 2^{0}")]
    Space(u8),

    #[error("The adaptive hash backend failed")]
    Adaptive(#[from] bcrypt::BcryptError),
}
