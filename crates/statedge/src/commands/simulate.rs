use statedge_core::host::{FrameTopology, HostCall, ScriptedHost};
use statedge_core::{
    AccessButton, AccessTier, ClickOutcome, Config, DiagnosticsRecorder, Frame, ResolutionRecord,
    SessionSignal,
};
use statedge_telemetry::{append_jsonl, read_jsonl, Paths};
use std::path::Path;

pub struct SimulateArgs {
    pub tier: AccessTier,
    pub frame: FrameTopology,
    pub loading: bool,
    pub record: bool,
    pub json: bool,
}

fn describe_call(call: &HostCall) -> String {
    match call {
        HostCall::OpenInNewContext { url } => format!("window.open({url}, _blank)"),
        HostCall::Assign { frame, url } => {
            let target = match frame {
                Frame::Current => "window",
                Frame::Parent => "window.parent",
                Frame::Top => "window.top",
            };
            format!("{target}.location.href = {url}")
        }
        HostCall::PostMessage {
            frame,
            message,
            target_origin,
        } => format!(
            "window.{frame}.postMessage({}, {target_origin})",
            message.to_json().unwrap_or_default()
        ),
        HostCall::Alert { message } => format!("alert({message})"),
    }
}

/// One simulated click on top of any previously recorded history
struct Simulation {
    button: AccessButton<ScriptedHost>,
    recorded: usize,
}

impl Simulation {
    /// Records produced by this run
    fn fresh(&self) -> &[ResolutionRecord] {
        &self.button.diagnostics().snapshot()[self.recorded..]
    }
}

fn simulate(args: &SimulateArgs, config: Config, history: Vec<ResolutionRecord>) -> Simulation {
    let host = ScriptedHost::new(args.frame);
    let diagnostics = DiagnosticsRecorder::resume(history);
    let recorded = diagnostics.len();
    let mut button = AccessButton::new(host, config, diagnostics);

    let session = if args.loading {
        SessionSignal::loading()
    } else {
        SessionSignal::ready(None)
    };

    match button.click(args.tier, &session) {
        Ok(ClickOutcome::Suppressed) => tracing::info!("session loading, click suppressed"),
        Ok(ClickOutcome::Dispatched(outcome)) => {
            if !outcome.is_delivered() {
                tracing::warn!(url = %outcome.url, "no strategy delivered the navigation");
            }
        }
        Err(err) => tracing::warn!("resolution failed: {}", err),
    }

    Simulation { button, recorded }
}

fn build_report(args: &SimulateArgs, sim: &Simulation) -> String {
    let button = &sim.button;
    let calls: Vec<String> = button.host().calls().iter().map(describe_call).collect();

    if args.json {
        let report = serde_json::json!({
            "tier": args.tier,
            "frame": args.frame.as_str(),
            "loading": args.loading,
            "context": button.diagnostics().context(),
            "records": sim.fresh(),
            "host_calls": calls,
        });
        return serde_json::to_string_pretty(&report).unwrap_or_default();
    }

    let mut sections = Vec::new();
    sections.push(format!(
        "Simulated click: tier={} frame={}{}",
        args.tier,
        args.frame,
        if args.loading { " (session loading)" } else { "" }
    ));

    if sim.fresh().is_empty() {
        sections.push("\nClick suppressed, nothing recorded".to_string());
        return sections.join("\n");
    }

    sections.push(format!("\n{}", button.diagnostics().render()));

    sections.push("\nHost calls\n----------".to_string());
    if calls.is_empty() {
        sections.push("  (none)".to_string());
    }
    for call in calls {
        sections.push(format!("  {}", call));
    }

    sections.join("\n")
}

pub fn run(args: SimulateArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    // Recorded runs continue the click numbering of the stored history
    let paths = if args.record { Some(Paths::new()?) } else { None };
    let history = match &paths {
        Some(paths) => read_jsonl(&paths.history_file())?,
        None => Vec::new(),
    };

    let sim = simulate(&args, config, history);
    println!("{}", build_report(&args, &sim));

    if let Some(paths) = paths {
        if !sim.fresh().is_empty() {
            let written = append_jsonl(&paths.history_file(), sim.fresh())?;
            tracing::info!(
                written,
                path = %paths.history_file().display(),
                "diagnostics recorded"
            );
        }
    }

    Ok(())
}
