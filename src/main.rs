//! auto-approve-safe - PreToolUse hook for maximum-autonomy solo workflows
//!
//! # Usage
//!
//! ```bash
//! # As a hook (reads JSON from stdin, writes JSON to stdout or nothing)
//! echo '{"tool_name":"Bash","tool_input":{"command":"ls -la"}}' | auto-approve-safe
//!
//! # With an extra rule file
//! auto-approve-safe --rules ./team.rules.json
//!
//! # Lint rule files
//! auto-approve-safe --lint .claude/scripts/auto_approve_safe.rules.json
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use auto_approve_safe::{
    audit::AuditLogger,
    config::Config,
    engine::DecisionEngine,
    input::HookInput,
    output::{HookOutput, Verdict},
    rules::{lint, RuleSet},
    tracing_init,
};

/// Print version information
fn print_version() {
    println!("auto-approve-safe {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"auto-approve-safe - auto-approve safe tool calls, deny dangerous ones

USAGE:
    auto-approve-safe [OPTIONS]
    auto-approve-safe --lint [PATH ...]

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file
    -r, --rules PATH        Extra rule file, merged after configured ones (repeatable)
        --no-audit          Do not write the decision audit log
        --lint [PATH ...]   Check rule files (default: configured ones) and exit

ENVIRONMENT:
    CLAUDE_PROJECT_DIR          Base for relative rule and audit paths
    AUTO_APPROVE_SAFE_LOG=LEVEL Diagnostics on stderr (error, warn, info, debug, trace)

USAGE AS HOOK:
    Configure in .claude/settings.local.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash|Read|Grep|Glob|Write|Edit|MultiEdit",
          "hooks": [{{ "type": "command", "command": "auto-approve-safe" }}]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
#[derive(Debug, Default)]
struct Args {
    help: bool,
    version: bool,
    no_audit: bool,
    config_path: Option<String>,
    rule_paths: Vec<String>,
    lint: Option<Vec<String>>,
}

impl Args {
    fn parse() -> Self {
        Self::parse_from(env::args().skip(1).collect())
    }

    fn parse_from(args: Vec<String>) -> Self {
        let mut result = Args::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "--no-audit" => result.no_audit = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                "-r" | "--rules" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.rule_paths.push(args[i].clone());
                    }
                }
                "--lint" => {
                    // everything after --lint that is not an option is a path
                    let paths: Vec<String> = args[i + 1..]
                        .iter()
                        .take_while(|a| !a.starts_with('-'))
                        .cloned()
                        .collect();
                    i += paths.len();
                    result.lint = Some(paths);
                }
                arg if arg.starts_with("--config=") => {
                    result.config_path = Some(arg.trim_start_matches("--config=").to_string());
                }
                arg if arg.starts_with("--rules=") => {
                    result.rule_paths.push(arg.trim_start_matches("--rules=").to_string());
                }
                other => tracing::debug!(arg = other, "ignoring unknown argument"),
            }
            i += 1;
        }

        result
    }
}

fn load_config(args: &Args) -> Config {
    match args.config_path {
        Some(ref path) => Config::load_from(Path::new(path)).unwrap_or_else(|e| {
            tracing::warn!("{e}; using defaults");
            Config::default().with_project_dir(Config::project_dir())
        }),
        None => Config::load(),
    }
}

/// Configured rule files followed by `--rules` ones
fn rule_paths(config: &Config, args: &Args) -> Vec<PathBuf> {
    let mut paths = config.rule_paths();
    paths.extend(args.rule_paths.iter().map(|p| config.resolve_path(p)));
    paths
}

fn main() -> ExitCode {
    tracing_init::init_tracing();
    let args = Args::parse();

    // Handle help and version
    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = load_config(&args);

    if let Some(ref paths) = args.lint {
        return run_lint(&config, &args, paths);
    }

    run_hook(&config, &args);
    ExitCode::SUCCESS
}

/// Lint rule files and report to stdout
fn run_lint(config: &Config, args: &Args, paths: &[String]) -> ExitCode {
    let paths: Vec<PathBuf> = if paths.is_empty() {
        rule_paths(config, args)
    } else {
        paths.iter().map(PathBuf::from).collect()
    };

    let mut failed = false;
    for path in &paths {
        let report = lint::lint_file(path);
        failed |= report.is_failure();
        println!("{report}");
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Evaluate one tool call from stdin
fn run_hook(config: &Config, args: &Args) {
    let mut input_json = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input_json) {
        tracing::warn!("failed to read stdin: {e}");
    }

    if input_json.trim().is_empty() {
        emit(&Verdict::ask("No input received"));
        return;
    }

    let input = match HookInput::from_json(&input_json) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!("error parsing input JSON: {e}");
            emit(&Verdict::ask("Failed to parse input"));
            return;
        }
    };

    let rules = RuleSet::load(&rule_paths(config, args));
    let verdict = decide_guarded(&input, &rules);
    tracing::debug!(
        tool = %input.tool_name,
        decision = verdict.decision(),
        reason = verdict.reason(),
        "decided"
    );

    let audit_path = if args.no_audit {
        None
    } else {
        config.audit_path()
    };
    if let Err(e) = AuditLogger::new(audit_path.as_deref()).log_decision(&input, &verdict) {
        tracing::warn!("could not write decision log: {e}");
    }

    emit(&verdict);
}

/// Decide with the panic guard around compilation and matching
fn decide_guarded(input: &HookInput, rules: &RuleSet) -> Verdict {
    guarded(|| DecisionEngine::new(rules).decide(input))
}

/// Run `decide`, turning any panic into an ask so the host falls back to
/// its own prompt instead of losing the hook
fn guarded(decide: impl FnOnce() -> Verdict) -> Verdict {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(decide));
    panic::set_hook(previous_hook);

    result.unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::error!("hook error: {message}");
        Verdict::ask(format!("Hook error: {message}"))
    })
}

/// Write the verdict to stdout; ask writes nothing
fn emit(verdict: &Verdict) {
    let Some(output) = HookOutput::from_verdict(verdict) else {
        return;
    };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", output.to_json());
    let _ = handle.flush();
}
