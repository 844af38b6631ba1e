use clap::Parser;
use libdeps_patcher::utils::{logger, validation::Validate};
use libdeps_patcher::{CliConfig, PatchApplicator, PatchJob, PatchOutcome, PatchReport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入設定，日誌格式可能來自設定檔
    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    logger::init_logger(config.log_format(), config.verbose());
    tracing::info!("Starting libdeps-patcher");
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置並建立作業
    let job = match config.validate().and_then(|_| PatchJob::from_provider(&config)) {
        Ok(job) => job,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    tracing::info!(
        "📁 Library: {} (marker {})",
        job.dependency_root.display(),
        job.marker.display()
    );

    let applicator = PatchApplicator::new(config.patch_tool());
    let result = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the patch tool will not be invoked");
        applicator.plan(&job)
    } else {
        applicator.run(&job)
    };

    match result {
        Ok(report) => print_report(&report, cli.json)?,
        Err(e) => {
            tracing::error!(
                "❌ Patching failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn print_report(report: &PatchReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let verb = match (report.outcome, report.dry_run) {
        (PatchOutcome::AlreadyPatched, _) => "already patched, nothing to do",
        (PatchOutcome::Applied, true) => "would be patched",
        (PatchOutcome::Applied, false) => "patched",
    };
    println!("✅ {}: {}", report.target.display(), verb);
    Ok(())
}
