use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use unicode_width::UnicodeWidthStr;

use qrcraft::api::{
    CmdMessage, ConfigAction, DisplayCode, ListFilter, MessageLevel, QrCraftApi, QrCraftPaths,
    SortOrder, StatsReport,
};
use qrcraft::clipboard::copy_to_clipboard;
use qrcraft::config::QrCraftConfig;
use qrcraft::error::{QrCraftError, Result};
use qrcraft::model::{ContentKind, QrStyle, ScanRecord};
use qrcraft::store::fs::FileStore;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: QrCraftApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Create {
            name,
            content,
            kind,
            style,
            output,
        }) => handle_create(&mut ctx, name, content, kind, style, output),
        Some(Commands::Scan { image, copy }) => handle_scan(&mut ctx, image, copy),
        Some(Commands::List { search, kind, sort }) => handle_list(&ctx, search, kind, sort),
        Some(Commands::Scans) => handle_scans(&ctx),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, selectors),
        Some(Commands::Download { selector, output }) => {
            handle_download(&mut ctx, selector, output)
        }
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, None, None, SortOrder::Newest),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match std::env::var_os("QRCRAFT_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "qrcraft", "qrcraft")
            .ok_or_else(|| QrCraftError::Api("Could not determine data dir".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = QrCraftConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(data_dir.clone());
    let paths = QrCraftPaths { data_dir };
    let mut api = QrCraftApi::new(store, config, paths);

    if cli.verbose {
        api.subscribe(|event| tracing::debug!(?event, "store mutated"));
    }

    Ok(AppContext { api })
}

fn handle_create(
    ctx: &mut AppContext,
    name: String,
    content: String,
    kind: ContentKind,
    style: Option<QrStyle>,
    output: Option<PathBuf>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(QrCraftError::Api("Name cannot be empty".into()));
    }
    if content.trim().is_empty() {
        return Err(QrCraftError::Api("Content cannot be empty".into()));
    }

    let result = ctx.api.create_code(name, content, kind, style, output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_scan(ctx: &mut AppContext, image: PathBuf, copy: bool) -> Result<()> {
    let result = ctx.api.scan_image(&image)?;
    print_messages(&result.messages);

    if copy {
        if let Some(scan) = result.listed_scans.first() {
            let text = scan.kind.display_content(&scan.content);
            match copy_to_clipboard(text) {
                Ok(()) => println!("Copied to clipboard."),
                Err(e) => eprintln!("Warning: Failed to copy to clipboard: {}", e),
            }
        }
    }
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    kind: Option<ContentKind>,
    sort: SortOrder,
) -> Result<()> {
    let filter = ListFilter { kind, search, sort };
    let result = ctx.api.list_codes(&filter)?;
    print_codes(&result.listed_codes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_scans(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_scans()?;
    print_scans(&result.listed_scans);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_codes(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_download(
    ctx: &mut AppContext,
    selector: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let result = ctx.api.download_code(&selector, output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(report) = &result.stats {
        print_stats(report);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.as_deref(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some("default-style"), None) => ConfigAction::ShowAll,
        (Some("default-style"), Some(v)) => ConfigAction::SetStyle(v.parse()?),
        (Some("download-width"), None) => ConfigAction::ShowAll,
        (Some("download-width"), Some(v)) => ConfigAction::SetDownloadWidth(
            v.parse()
                .map_err(|_| QrCraftError::Api(format!("Invalid width: {}", v)))?,
        ),
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
            return Ok(());
        }
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        println!("default-style = {}", config.default_style);
        println!("download-width = {}", config.download_width);
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_codes(codes: &[DisplayCode]) {
    if codes.is_empty() {
        println!("No codes found.");
        return;
    }

    for dc in codes {
        let idx_str = format!("{:>3}. ", dc.index);
        let kind_tag = format!("{:<5} ", dc.code.kind.to_string());
        let downloads = format!("{:>3} dl ", dc.code.download_count);
        let time_ago = format_time_ago(dc.code.created_at);

        let display = dc.code.kind.display_content(&dc.code.content);
        let preview: String = display
            .chars()
            .take(40)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let name_content = if preview.is_empty() {
            dc.code.name.clone()
        } else {
            format!("{} {}", dc.code.name, preview)
        };

        let fixed = idx_str.width() + kind_tag.width() + downloads.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title_display = truncate_to_width(&name_content, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "{}{}{}{}{}{}",
            idx_str,
            title_display,
            " ".repeat(padding),
            kind_colored(dc.code.kind, &kind_tag),
            downloads.dimmed(),
            time_ago.dimmed()
        );
    }
}

fn print_scans(scans: &[ScanRecord]) {
    if scans.is_empty() {
        println!("No scans yet.");
        return;
    }

    for (i, scan) in scans.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let kind_tag = format!("{:<5} ", scan.kind.to_string());
        let time_ago = format_time_ago(scan.scanned_at);

        let display = scan.kind.display_content(&scan.content);
        let preview: String = display
            .chars()
            .take(60)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();

        let fixed = idx_str.width() + kind_tag.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let content_display = truncate_to_width(&preview, available);
        let padding = available.saturating_sub(content_display.width());

        println!(
            "{}{}{}{}{}",
            idx_str,
            content_display,
            " ".repeat(padding),
            kind_colored(scan.kind, &kind_tag),
            time_ago.dimmed()
        );
    }
}

fn print_stats(report: &StatsReport) {
    println!("{}", "Totals".bold());
    println!("  codes created   {}", report.total_codes);
    println!("  downloads       {}", report.total_downloads);
    println!("  codes scanned   {}", report.total_scans);
    match report.most_used_kind {
        Some(kind) => println!("  most used kind  {}", kind),
        None => println!("  most used kind  -"),
    }

    if !report.kind_distribution.is_empty() {
        println!();
        println!("{}", "By kind".bold());
        for kc in &report.kind_distribution {
            println!("  {:<8}{:>5}", kc.kind.to_string(), kc.count);
        }
    }

    if !report.monthly.is_empty() {
        println!();
        println!("{}", "Created per month".bold());
        for mc in &report.monthly {
            println!("  {:<10}{:>5}", mc.month, mc.count);
        }
    }

    println!();
    println!("{}", "Last 7 days".bold());
    for day in &report.last_week {
        println!(
            "  {}  {:>3} created  {:>3} scanned",
            day.date, day.created, day.scanned
        );
    }
}

fn kind_colored(kind: ContentKind, text: &str) -> ColoredString {
    match kind {
        ContentKind::Url => text.green(),
        ContentKind::Text => text.cyan(),
        ContentKind::Email => text.magenta(),
        ContentKind::Phone => text.yellow(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
