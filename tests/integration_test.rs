//! Integration tests for Multibar
//!
//! These tests drive the public API end to end: config, client, contracts and hooks.

use std::io::Write;
use std::sync::{Arc, Mutex};

use multibar::bar::{Progressbar, Sector, SectorContainer};
use multibar::calculation::{CalculationService, CalculationServiceFactory, ProgressbarCalculationService};
use multibar::config::Config;
use multibar::contracts::{Contract, ContractCheck, write_progress_contract};
use multibar::metadata::CallMetadata;
use multibar::output::CapturingReporter;
use multibar::signature::{Chars, Signature};
use multibar::{MultibarError, ProgressWriter, ProgressbarClient, ProgressbarWriter, writer_hooks};
use tempfile::TempDir;

// =============================================================================
// Calculation and writer
// =============================================================================

#[test]
fn test_half_bar_indexes_and_rendering() {
    let service = ProgressbarCalculationService::new(50.0, 100.0, 6).expect("valid input");
    assert_eq!(service.filled_indexes().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(service.unfilled_indexes().collect::<Vec<_>>(), vec![3, 4, 5]);

    let writer = ProgressWriter::from_signature(Chars::new("+", "-").to_signature());
    assert_eq!(writer.write(50, 100, 6).expect("write").to_string(), "+++---");
}

#[test]
fn test_current_equals_target_fills_everything() {
    let service = ProgressbarCalculationService::new(7.0, 7.0, 9).expect("valid input");
    assert_eq!(service.percentage(), 100.0);
    assert_eq!(service.filled_count(), 9);
    assert_eq!(service.unfilled_count(), 0);
}

#[test]
fn test_slicing_a_written_bar() {
    let bar: Progressbar = ProgressWriter::new().write(1, 2, 10).expect("write");
    let head = &bar[..5];
    assert!(head.iter().all(|s| s.is_filled()));
    assert_eq!(bar.get(-1).map(|s| s.position()), Some(9));
}

// =============================================================================
// Client, contracts and hooks
// =============================================================================

#[test]
fn test_client_boundary_glyph_thresholds() {
    let signature = Chars::new("=", " ").with_start("[", "(").with_end("]", ")").to_signature();
    let mut client = ProgressbarClient::with_writer(ProgressWriter::from_signature(signature));
    client.set_hooks(writer_hooks());

    let render = |current| client.get_progress(current, 100, 20).expect("render").to_string();

    assert!(render(2).starts_with('('));
    assert!(render(3).starts_with('['));
    assert!(render(96).ends_with(')'));
    assert!(render(97).ends_with(']'));
}

/// Reports how much is left rather than how much is done
struct Countdown(ProgressbarCalculationService);

impl CalculationService for Countdown {
    fn current(&self) -> f64 {
        self.0.current()
    }

    fn target(&self) -> f64 {
        self.0.target()
    }

    fn length(&self) -> usize {
        self.0.length()
    }

    fn percentage(&self) -> f64 {
        100.0 - self.0.percentage()
    }
}

struct CountdownCalculation;

impl CalculationServiceFactory for CountdownCalculation {
    type Service = Countdown;

    fn name(&self) -> &'static str {
        "CountdownCalculation"
    }

    fn create(&self, current: f64, target: f64, length: usize) -> Result<Countdown, MultibarError> {
        ProgressbarCalculationService::new(current, target, length).map(Countdown)
    }
}

#[test]
fn test_boundary_glyphs_follow_swapped_calculation() {
    let signature = Chars::new("+", "-").with_start("S", "s").with_end("E", "e").to_signature();
    let writer = ProgressWriter::from_signature(signature).with_calculation_factory(CountdownCalculation);
    let mut client = ProgressbarClient::with_writer(writer);
    client.set_hooks(writer_hooks());

    assert_eq!(client.get_progress(0, 100, 6).expect("render").to_string(), "S++++E");
    assert_eq!(client.get_progress(100, 100, 6).expect("render").to_string(), "s----e");

    let metadata = client.call_metadata(0, 100, 6);
    assert_eq!(metadata.percentage, 100.0);
    assert_eq!(metadata.calculation_service, "CountdownCalculation");

    let report = client.get_report(25, 100, 4).expect("report");
    assert_eq!(report.percentage, 75.0);
    assert_eq!(report.bar, "S++e");
}

#[test]
fn test_client_raises_then_reports() {
    let mut client = ProgressbarClient::new();
    let err = client.get_progress(100, 50, 20).unwrap_err();
    assert!(err.is_contract_error());

    let reporter = CapturingReporter::new();
    client.contract_manager_mut().set_reporter(Arc::new(reporter.clone()));
    client.contract_manager_mut().set_raise_errors(false);

    assert!(client.get_progress(100, 50, 20).is_ok());
    assert!(reporter.lines().iter().any(|l| l.contains("WriteProgressContract")));
}

#[derive(Debug)]
struct EvenLengthContract;

impl Contract for EvenLengthContract {
    fn name(&self) -> &str {
        "EvenLengthContract"
    }

    fn check(&self, metadata: Option<&CallMetadata>) -> ContractCheck {
        match metadata {
            Some(meta) if meta.length % 2 == 0 => ContractCheck::done(Some(meta.clone())),
            other => ContractCheck::terminated(
                other.cloned(),
                vec!["odd lengths look lopsided".to_string()],
                vec!["Length must be even.".to_string()],
            ),
        }
    }
}

#[test]
fn test_custom_contract_runs_after_builtin() {
    let contract: Arc<dyn Contract> = Arc::new(EvenLengthContract);
    let mut client = ProgressbarClient::new();
    client.contract_manager_mut().subscribe(contract.clone());

    assert!(client.get_progress(1, 2, 4).is_ok());

    let err = client.get_progress(1, 2, 5).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Contract EvenLengthContract was terminated: Length must be even. & odd lengths look lopsided"
    );

    client.contract_manager_mut().terminate(&contract);
    assert!(client.get_progress(1, 2, 5).is_ok());
}

#[test]
fn test_unsigned_contract_guard() {
    let client = ProgressbarClient::new();
    let stranger: Arc<dyn Contract> = Arc::new(EvenLengthContract);

    let err = client.contract_manager().check_contract(&stranger, None).unwrap_err();
    assert!(matches!(err, MultibarError::UnsignedContract { .. }));
    assert!(
        client
            .contract_manager()
            .check_contract(&write_progress_contract(), None)
            .is_err()
    );
}

#[test]
fn test_hook_pipeline_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (pre, post, on_error) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));

    let mut client = ProgressbarClient::new();
    client
        .hooks_mut()
        .add_on_error(move |_| {
            on_error.lock().unwrap().push("error");
            Ok(())
        })
        .add_pre_execution(move |_| {
            pre.lock().unwrap().push("pre");
            Ok(())
        })
        .add_post_execution(move |_| {
            post.lock().unwrap().push("post");
            Ok(())
        });

    client.get_progress(1, 2, 4).expect("valid call");
    client.get_progress(3, 2, 4).expect("handled by on-error hook");

    assert_eq!(*log.lock().unwrap(), vec!["pre", "post", "error", "pre", "post"]);
}

#[test]
fn test_failing_hook_aborts_call() {
    let mut client = ProgressbarClient::new();
    client
        .hooks_mut()
        .add_pre_execution(|_| Err(MultibarError::hook("gate", "closed")));

    let err = client.get_progress(1, 2, 4).unwrap_err();
    assert_eq!(err.to_string(), "Hook gate failed: closed");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_client_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("multibar.yml");
    let mut file = std::fs::File::create(&path).expect("create config");
    writeln!(
        file,
        r#"
render:
  length: 5
  preset: dots
presets:
  dots:
    fill: "o"
    line: "."
"#
    )
    .expect("write config");

    let config = Config::load(Some(&path)).expect("load config");
    config.validate().expect("valid config");

    let client = ProgressbarClient::from_config(&config).expect("client");
    let bar = client.get_progress(2, 5, config.render.length).expect("render");
    assert_eq!(bar.render(), "oo...");
}

#[test]
fn test_config_without_boundary_glyphs() {
    let mut config = Config::default();
    config.render.boundary_glyphs = false;

    let client = ProgressbarClient::from_config(&config).expect("client");
    assert!(client.hooks().is_empty());
    assert_eq!(client.get_progress(100, 100, 4).expect("render").to_string(), "++++");
    assert_eq!(client.writer().signature(), &Signature::simple());
}

// =============================================================================
// Async offload
// =============================================================================

#[tokio::test]
async fn test_concurrent_offloaded_writes() {
    let writer = Arc::new(ProgressWriter::new());

    let handles: Vec<_> = (0..=10u64)
        .map(|i| tokio::spawn(multibar::write_offloaded(Arc::clone(&writer), i, 10, 10)))
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let bar = handle.await.expect("join").expect("write");
        assert_eq!(bar.filled_count(), i);
        assert_eq!(bar.len(), 10);
    }
}
