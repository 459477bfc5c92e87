//! Interactive operator PIN prompt

use crate::error::SecretError;
use crate::model::Pin;
use crate::ports::SecretProvider;

/// Prompts for the operator PIN on the controlling terminal without echo
#[derive(Debug, Clone, Default)]
pub struct PinPrompt;

impl SecretProvider for PinPrompt {
    fn operator_pin(&self) -> Result<Pin, SecretError> {
        let entered = rpassword::prompt_password("Operator PIN: ")?;
        Ok(Pin::new(entered)?)
    }
}
