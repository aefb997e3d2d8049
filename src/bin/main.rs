use guided_assistant::{
    calculator,
    models::PageSection,
    presentation::{PresentationAdapter, TerminalPresenter},
    scheduler::TokioScheduler,
    AssistantConfig, AssistantWidget,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "commands: <number> | <option label> | open | close | calc <value> | help | quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing (stderr, so stdout stays the widget)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AssistantConfig::from_env()?;
    info!(
        locale = ?config.locale,
        reply_delay_ms = config.reply_delay.as_millis() as u64,
        "Guided assistant starting"
    );

    let presenter = Arc::new(TerminalPresenter::stdout(config.render_mode));
    let scheduler = Arc::new(TokioScheduler::current()?);
    let widget = AssistantWidget::new(config, scheduler, presenter.clone())?;

    println!("{}", HELP);
    widget.open();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let mut words = input.split_whitespace();

        match words.next() {
            None => continue,
            Some("quit") | Some("exit") => break,
            Some("help") => println!("{}", HELP),
            Some("open") => widget.open(),
            Some("close") => widget.close(),
            Some("calc") => match words.next().map(str::parse::<u64>) {
                Some(Ok(value)) => {
                    presenter.set_credit_value(value);
                    presenter.focus_section(PageSection::Calculator);
                }
                _ => println!(
                    "calc needs a value between {} and {}",
                    calculator::format_brl(calculator::MIN_CREDIT),
                    calculator::format_brl(calculator::MAX_CREDIT)
                ),
            },
            Some(_) => {
                let result = match input.parse::<usize>() {
                    Ok(number) if number > 0 => widget.select_index(number - 1),
                    _ => match widget
                        .offered_options()
                        .into_iter()
                        .find(|o| o.label.eq_ignore_ascii_case(input))
                    {
                        Some(option) => widget.select_option(&option),
                        None => {
                            println!("{}", HELP);
                            Ok(())
                        }
                    },
                };

                // The conversation keeps flowing; a bad pick is only logged.
                if let Err(error) = result {
                    warn!("Selection ignored: {}", error);
                }
            }
        }
    }

    info!("Guided assistant stopped");
    Ok(())
}
