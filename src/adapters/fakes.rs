#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::ffi::OsString;
#[cfg(test)]
use std::path::{Path, PathBuf};

#[cfg(test)]
use crate::error::{ResolveError, SecretError, ToolError};
#[cfg(test)]
use crate::model::Pin;
#[cfg(test)]
use crate::ports::{ModuleResolver, SecretProvider, ToolRunner};

/// One recorded external-tool call
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: PathBuf,
    pub args: Vec<OsString>,
}

#[cfg(test)]
impl Invocation {
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Value following `flag` in the argument vector, if any
    pub fn arg_after(&self, flag: &str) -> Option<String> {
        let args = self.arg_strings();
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    }
}

/// Recording tool runner that mimics the file side effects of the real tools
///
/// Extraction and conversion name their output file on the command line
/// (`--output-file` / `-out`); the fake writes a marker file there so the
/// produced directory layout can be asserted on.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FakeToolRunner {
    pub invocations: RefCell<Vec<Invocation>>,
    /// Fail the call at this 0-based index with exit code 1
    pub fail_on_call: Option<usize>,
}

#[cfg(test)]
impl FakeToolRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on_call(index: usize) -> Self {
        Self {
            invocations: RefCell::new(Vec::new()),
            fail_on_call: Some(index),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }
}

#[cfg(test)]
impl ToolRunner for FakeToolRunner {
    fn run(&self, tool: &Path, args: &[OsString]) -> Result<(), ToolError> {
        let invocation = Invocation {
            tool: tool.to_path_buf(),
            args: args.to_vec(),
        };
        let call_index = {
            let mut invocations = self.invocations.borrow_mut();
            invocations.push(invocation.clone());
            invocations.len() - 1
        };

        if self.fail_on_call == Some(call_index) {
            return Err(ToolError::Failed {
                tool: tool.display().to_string(),
                code: 1,
            });
        }

        for flag in ["--output-file", "-out"] {
            if let Some(out) = invocation.arg_after(flag) {
                std::fs::write(&out, b"fake key material").expect("fake output write");
            }
        }
        Ok(())
    }
}

/// Module resolver returning a fixed path and counting how often it ran
#[cfg(test)]
#[derive(Debug)]
pub struct FixedResolver {
    pub module: PathBuf,
    pub calls: Cell<usize>,
}

#[cfg(test)]
impl FixedResolver {
    pub fn new(module: impl Into<PathBuf>) -> Self {
        Self {
            module: module.into(),
            calls: Cell::new(0),
        }
    }
}

#[cfg(test)]
impl ModuleResolver for FixedResolver {
    fn resolve(&self) -> Result<PathBuf, ResolveError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.module.clone())
    }
}

/// Secret provider handing out a fixed in-memory PIN
#[cfg(test)]
#[derive(Debug)]
pub struct FixedSecret(pub &'static str);

#[cfg(test)]
impl SecretProvider for FixedSecret {
    fn operator_pin(&self) -> Result<Pin, SecretError> {
        Ok(Pin::new(self.0.to_string())?)
    }
}
