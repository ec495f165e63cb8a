use dash_manifest::args::{get_log_level_filter, parse_args};
use dash_manifest::duration::format_duration;
use dash_manifest::{MpdParser, ParserSettings};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, Layer};

fn main() {
    let args = parse_args();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(get_log_level_filter(&args));
    let subscriber = tracing_subscriber::registry().with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global default subscriber");

    info!("{:?}", args);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &dash_manifest::args::Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match &args.settings {
        Some(path) => ParserSettings::from_file(path)?,
        None => ParserSettings::default(),
    };
    let parser = MpdParser::new(settings);

    let content = std::fs::read_to_string(&args.manifest)?;
    let is_json = args
        .manifest
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parser.load_json(&content)?;
    } else {
        parser.load_xml(&content)?;
    }

    let summary = parser
        .summary(args.manifest_url.as_deref())
        .ok_or("manifest was not loaded")?;
    info!(
        "{} adaptation sets, {} subtitle tracks, duration {}",
        summary.adaptation_sets.len(),
        summary.subtitles.len(),
        format_duration(summary.timing.total_duration)
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
