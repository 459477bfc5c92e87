//! Key ceremony orchestration
//!
//! Runs the full ceremony for one device: for each configured key role, in
//! order, generate a keypair on the device, read back the public half and
//! convert it to PEM. Every step must succeed before the next one runs and
//! any failure aborts the remaining roles; hardware state mutated by earlier
//! steps is left for the operator to reconcile.

use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, info};

use crate::error::CeremonyResult;
use crate::logic::RolePaths;
use crate::model::{KeyRole, SlotId, KEY_ROLES};
use crate::ports::{ModuleResolver, ToolRunner};
use crate::use_cases::Session;

/// Run the ceremony for every configured key role
///
/// Role order determines slot assignment, so `KEY_ROLES` is iterated as
/// declared. Before any hardware operation for a role, both output paths
/// are checked: a pre-existing file halts the whole ceremony untouched.
///
/// # Errors
///
/// Any resolver, tool or overwrite-protection failure aborts the run.
pub fn run_ceremony<M, R>(resolver: &M, runner: &R, session: &Session) -> CeremonyResult<()>
where
    M: ModuleResolver,
    R: ToolRunner,
{
    for (index, role) in KEY_ROLES.iter().enumerate() {
        let slot = SlotId::for_role_index(index);
        let paths = RolePaths::new(&session.out_dir, &session.serial, role);

        paths.ensure_absent()?;
        debug!(role = role.name(), slot = %slot, "output paths clear");

        generate_keypair(resolver, runner, session, role, slot)?;
        extract_public_key(resolver, runner, session, slot, &paths.raw)?;
        convert_public_key(runner, session, &paths.raw, &paths.pem)?;

        info!(role = role.name(), slot = %slot, "role provisioned");
    }
    Ok(())
}

/// Generate the keypair for `role` inside the device
///
/// Mutates on-device state; not reversible from here.
fn generate_keypair<M, R>(
    resolver: &M,
    runner: &R,
    session: &Session,
    role: &KeyRole,
    slot: SlotId,
) -> CeremonyResult<()>
where
    M: ModuleResolver,
    R: ToolRunner,
{
    let module = resolver.resolve()?;
    info!(role = role.name(), slot = %slot, "generating keypair on device");

    let id = slot.to_string();
    let mut args = pkcs11_base_args(&module, session);
    args.extend(
        [
            "--keypairgen",
            "--key-type",
            session.algorithm.key_type(),
            "--id",
            id.as_str(),
            "--label",
            role.name(),
        ]
        .map(OsString::from),
    );
    runner.run(&session.pkcs11_tool, &args)?;
    Ok(())
}

/// Read back the public half of the keypair in `slot` in raw form
fn extract_public_key<M, R>(
    resolver: &M,
    runner: &R,
    session: &Session,
    slot: SlotId,
    raw_path: &Path,
) -> CeremonyResult<()>
where
    M: ModuleResolver,
    R: ToolRunner,
{
    let module = resolver.resolve()?;
    debug!(slot = %slot, raw = %raw_path.display(), "extracting public key");

    let id = slot.to_string();
    let mut args = pkcs11_base_args(&module, session);
    args.extend(["--read-object", "--type", "pubkey", "--id", id.as_str()].map(OsString::from));
    args.push(OsString::from("--output-file"));
    args.push(raw_path.as_os_str().to_os_string());
    runner.run(&session.pkcs11_tool, &args)?;
    Ok(())
}

/// Convert the raw public key to PEM
fn convert_public_key<R>(
    runner: &R,
    session: &Session,
    raw_path: &Path,
    pem_path: &Path,
) -> CeremonyResult<()>
where
    R: ToolRunner,
{
    debug!(pem = %pem_path.display(), "converting public key to PEM");

    let mut args: Vec<OsString> = vec![OsString::from(session.algorithm.pem_subcommand())];
    args.extend(["-pubin", "-inform", "DER", "-in"].map(OsString::from));
    args.push(raw_path.as_os_str().to_os_string());
    args.extend(["-pubout", "-outform", "PEM", "-out"].map(OsString::from));
    args.push(pem_path.as_os_str().to_os_string());
    runner.run(&session.openssl_tool, &args)?;
    Ok(())
}

/// Arguments shared by every pkcs11-tool invocation
///
/// The module path comes from a fresh resolution per call.
fn pkcs11_base_args(module: &Path, session: &Session) -> Vec<OsString> {
    vec![
        OsString::from("--module"),
        module.as_os_str().to_os_string(),
        OsString::from("--login"),
        OsString::from("--pin"),
        OsString::from(session.pin.as_str()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::adapters::fakes::{FakeToolRunner, FixedResolver, Invocation};
    use crate::error::{CeremonyError, ToolError};
    use crate::model::{Algorithm, Pin, Serial};

    fn test_session(out_dir: &Path) -> Session {
        Session {
            algorithm: Algorithm::EcP256,
            serial: Serial::new("ABC123").unwrap(),
            pin: Pin::new("123456".to_string()).unwrap(),
            out_dir: out_dir.to_path_buf(),
            pkcs11_tool: PathBuf::from("/usr/bin/pkcs11-tool"),
            openssl_tool: PathBuf::from("/usr/bin/openssl"),
        }
    }

    fn resolver() -> FixedResolver {
        FixedResolver::new("/usr/lib/opensc-pkcs11.so")
    }

    fn assert_is_generate(call: &Invocation, slot: &str, label: &str) {
        assert_eq!(call.tool, Path::new("/usr/bin/pkcs11-tool"));
        assert!(call.arg_strings().contains(&"--keypairgen".to_string()));
        assert_eq!(call.arg_after("--id").unwrap(), slot);
        assert_eq!(call.arg_after("--label").unwrap(), label);
    }

    fn assert_is_extract(call: &Invocation, slot: &str) {
        assert_eq!(call.tool, Path::new("/usr/bin/pkcs11-tool"));
        assert!(call.arg_strings().contains(&"--read-object".to_string()));
        assert_eq!(call.arg_after("--type").unwrap(), "pubkey");
        assert_eq!(call.arg_after("--id").unwrap(), slot);
    }

    fn assert_is_convert(call: &Invocation, subcommand: &str) {
        assert_eq!(call.tool, Path::new("/usr/bin/openssl"));
        assert_eq!(call.arg_strings()[0], subcommand);
        assert!(call.arg_strings().contains(&"-pubin".to_string()));
    }

    #[test]
    fn test_full_ceremony_sequences_all_roles() {
        let dir = tempfile::tempdir().unwrap();
        let session = test_session(dir.path());
        let runner = FakeToolRunner::new();
        let resolver = resolver();

        run_ceremony(&resolver, &runner, &session).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 6);
        assert_is_generate(&calls[0], "12", "root");
        assert_is_extract(&calls[1], "12");
        assert_is_convert(&calls[2], "ec");
        assert_is_generate(&calls[3], "13", "targets");
        assert_is_extract(&calls[4], "13");
        assert_is_convert(&calls[5], "ec");

        for name in [
            "ABC123_root_pubkey.pub",
            "ABC123_root_pubkey.pem",
            "ABC123_targets_pubkey.pub",
            "ABC123_targets_pubkey.pem",
        ] {
            assert!(dir.path().join(name).is_file(), "missing {name}");
        }
        assert_eq!(dir.path().read_dir().unwrap().count(), 4);
    }

    #[test]
    fn test_module_is_re_resolved_for_every_device_call() {
        let dir = tempfile::tempdir().unwrap();
        let session = test_session(dir.path());
        let runner = FakeToolRunner::new();
        let resolver = resolver();

        run_ceremony(&resolver, &runner, &session).unwrap();

        // generate + extract per role, conversion needs no module
        assert_eq!(resolver.calls.get(), 4);
    }

    #[test]
    fn test_device_calls_authenticate_with_the_session_pin() {
        let dir = tempfile::tempdir().unwrap();
        let session = test_session(dir.path());
        let runner = FakeToolRunner::new();
        let resolver = resolver();

        run_ceremony(&resolver, &runner, &session).unwrap();

        for call in runner
            .calls()
            .iter()
            .filter(|c| c.tool == Path::new("/usr/bin/pkcs11-tool"))
        {
            assert_eq!(call.arg_after("--module").unwrap(), "/usr/lib/opensc-pkcs11.so");
            assert_eq!(call.arg_after("--pin").unwrap(), "123456");
        }
    }

    #[test]
    fn test_rsa_session_converts_with_rsa_subcommand() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = test_session(dir.path());
        session.algorithm = Algorithm::Rsa2048;
        let runner = FakeToolRunner::new();
        let resolver = resolver();

        run_ceremony(&resolver, &runner, &session).unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].arg_after("--key-type").unwrap(), "rsa:2048");
        assert_is_convert(&calls[2], "rsa");
    }

    #[test]
    fn test_existing_output_halts_before_any_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let session = test_session(dir.path());
        let existing = dir.path().join("ABC123_root_pubkey.pub");
        std::fs::write(&existing, b"previously generated key").unwrap();

        let runner = FakeToolRunner::new();
        let resolver = resolver();
        let err = run_ceremony(&resolver, &runner, &session).unwrap_err();

        assert!(matches!(err, CeremonyError::OutputAlreadyExists { .. }));
        assert!(runner.calls().is_empty());
        assert_eq!(resolver.calls.get(), 0);
        assert_eq!(
            std::fs::read(&existing).unwrap(),
            b"previously generated key"
        );
    }

    #[test]
    fn test_existing_later_role_output_halts_after_earlier_roles() {
        let dir = tempfile::tempdir().unwrap();
        let session = test_session(dir.path());
        let existing = dir.path().join("ABC123_targets_pubkey.pem");
        std::fs::write(&existing, b"stale pem").unwrap();

        let runner = FakeToolRunner::new();
        let resolver = resolver();
        let err = run_ceremony(&resolver, &runner, &session).unwrap_err();

        assert!(matches!(err, CeremonyError::OutputAlreadyExists { .. }));
        // root completed fully, targets never started
        assert_eq!(runner.calls().len(), 3);
        assert!(dir.path().join("ABC123_root_pubkey.pem").is_file());
        assert!(!dir.path().join("ABC123_targets_pubkey.pub").exists());
        assert_eq!(std::fs::read(&existing).unwrap(), b"stale pem");
    }

    #[test]
    fn test_generation_failure_stops_the_role_and_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let session = test_session(dir.path());
        let runner = FakeToolRunner::failing_on_call(0);
        let resolver = resolver();

        let err = run_ceremony(&resolver, &runner, &session).unwrap_err();

        assert!(matches!(
            err,
            CeremonyError::Tool(ToolError::Failed { code: 1, .. })
        ));
        assert_eq!(runner.calls().len(), 1);
        assert_eq!(dir.path().read_dir().unwrap().count(), 0);
    }

    #[test]
    fn test_extraction_failure_skips_conversion_and_later_roles() {
        let dir = tempfile::tempdir().unwrap();
        let session = test_session(dir.path());
        let runner = FakeToolRunner::failing_on_call(1);
        let resolver = resolver();

        let err = run_ceremony(&resolver, &runner, &session).unwrap_err();

        assert!(matches!(err, CeremonyError::Tool(ToolError::Failed { .. })));
        assert_eq!(runner.calls().len(), 2);
        assert_eq!(dir.path().read_dir().unwrap().count(), 0);
    }

    #[test]
    fn test_conversion_failure_aborts_remaining_roles() {
        let dir = tempfile::tempdir().unwrap();
        let session = test_session(dir.path());
        let runner = FakeToolRunner::failing_on_call(2);
        let resolver = resolver();

        let err = run_ceremony(&resolver, &runner, &session).unwrap_err();

        assert!(matches!(err, CeremonyError::Tool(ToolError::Failed { .. })));
        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        // raw key was extracted before the conversion failed
        assert!(dir.path().join("ABC123_root_pubkey.pub").is_file());
        assert!(!dir.path().join("ABC123_root_pubkey.pem").exists());
        assert!(!dir.path().join("ABC123_targets_pubkey.pub").exists());
    }
}
