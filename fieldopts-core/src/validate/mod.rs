mod rules;
mod validator;

use crate::error::ConfigurationError;

pub(crate) use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigurationError>;
}
