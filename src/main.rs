use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hrdesk::cache::LoggingInvalidator;
use hrdesk::config::HrConfig;
use hrdesk::goals::GoalUpdater;
use hrdesk::kpi::KpiCalculator;
use hrdesk::models::*;
use hrdesk::notify::ConsoleNotifier;
use hrdesk::payslip::{FilePayslipGenerator, PayslipBrowser};

#[derive(Parser)]
#[command(name = "hrdesk")]
#[command(about = "Goal progress, KPI incentives and payslips from the HR API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report progress on a performance goal
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Compute a KPI score and the resulting incentive
    Kpi {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        quality: String,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        productivity: String,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        collaboration: String,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        goal: String,
        /// Currency per KPI point (defaults to the configured rate)
        #[arg(long, allow_hyphen_values = true)]
        base_rate: Option<String>,
        /// Incentive cap (defaults to the configured cap)
        #[arg(long, allow_hyphen_values = true)]
        max_incentive: Option<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse and download monthly payslips
    #[command(subcommand)]
    Payslip(PayslipCommand),
    /// List employees that can be selected for payslips
    Employees,
}

#[derive(Subcommand)]
enum GoalCommand {
    /// Update progress and status
    Update {
        id: i64,
        #[arg(long, allow_hyphen_values = true)]
        progress: String,
        /// pending, in_progress or completed
        #[arg(long, default_value = "in_progress")]
        status: String,
        /// Replace the goal notes (left unchanged when omitted)
        #[arg(long)]
        notes: Option<String>,
    },
    /// Set progress to 100% and mark the goal completed
    Complete {
        id: i64,
        /// Replace the goal notes (left unchanged when omitted)
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(clap::Args)]
struct PeriodArgs {
    /// Month 1-12 (defaults to the current month)
    #[arg(long)]
    month: Option<u32>,
    /// Year, current or one of the two before (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
    /// Restrict to one employee (ignored for employees)
    #[arg(long)]
    employee: Option<i64>,
}

#[derive(Subcommand)]
enum PayslipCommand {
    /// List payroll records for a period
    List {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Download the payslip of one payroll record
    Download {
        /// Payroll record id
        record: i64,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Download every payslip of a period, one after another
    DownloadAll {
        #[command(flatten)]
        period: PeriodArgs,
    },
}

/// Initialize tracing on stderr so stdout only carries command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "hrdesk=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = HrConfig::load();

    match cli.command {
        Commands::Goal(command) => run_goal(&config, command).await?,
        Commands::Kpi {
            quality,
            productivity,
            collaboration,
            goal,
            base_rate,
            max_incentive,
            json,
        } => {
            let mut calc = KpiCalculator::new();
            calc.set_base_incentive_rate(config.base_incentive_rate);
            calc.set_max_incentive(config.max_incentive);
            calc.set_score_input(KpiCategory::Quality, &quality);
            calc.set_score_input(KpiCategory::Productivity, &productivity);
            calc.set_score_input(KpiCategory::Collaboration, &collaboration);
            calc.set_score_input(KpiCategory::Goal, &goal);
            if let Some(raw) = base_rate {
                calc.set_base_incentive_rate_input(&raw);
            }
            if let Some(raw) = max_incentive {
                calc.set_max_incentive_input(&raw);
            }

            let result = calc.finish_now();
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for category in KpiCategory::ALL {
                    println!(
                        "{:<20} {:>6.1}  ({}%)",
                        category.label(),
                        result.assessment.score(category),
                        result.assessment.weight(category)
                    );
                }
                println!("Total KPI Score      {:>6.1}", result.total_kpi);
                println!("Performance Incentive {:.2}", result.incentive_amount);
                println!("Performance Rating   {}", calc.rating().as_str());
            }
        }
        Commands::Payslip(command) => run_payslip(&config, command).await?,
        Commands::Employees => {
            let browser = payslip_browser(&config);
            if browser.caller().is_employee() {
                bail!("Employees can only view their own payslips");
            }
            for user in browser.employee_choices().await? {
                println!(
                    "{:>6}  {} ({})",
                    user.id,
                    user.full_name(),
                    user.employee_id.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}

async fn run_goal(config: &HrConfig, command: GoalCommand) -> anyhow::Result<()> {
    let notifier = Arc::new(ConsoleNotifier);
    let invalidator = Arc::new(LoggingInvalidator);

    let outcome = match command {
        GoalCommand::Update {
            id,
            progress,
            status,
            notes,
        } => {
            let status = GoalStatus::from_str(&status)
                .with_context(|| format!("Unknown goal status '{}'", status))?;
            let mut updater = GoalUpdater::new(config.client(), notifier, invalidator, Goal::with_id(id));
            let form = updater.form_mut();
            form.set_progress_input(&progress);
            form.status = status;
            form.notes = notes;
            updater.submit().await
        }
        GoalCommand::Complete { id, notes } => {
            let mut updater = GoalUpdater::new(config.client(), notifier, invalidator, Goal::with_id(id));
            updater.form_mut().notes = notes;
            updater.complete().await
        }
    };

    let goal = outcome?;
    println!(
        "Goal {}: {}% ({})",
        goal.id,
        goal.progress.unwrap_or(0),
        goal.status.map(|s| s.label()).unwrap_or("unknown")
    );
    Ok(())
}

fn payslip_browser(config: &HrConfig) -> PayslipBrowser {
    let generator = Arc::new(FilePayslipGenerator::new(config.output_dir.clone()));
    PayslipBrowser::new(
        config.client(),
        config.caller(),
        generator,
        Arc::new(ConsoleNotifier),
        chrono::Local::now().date_naive(),
    )
    .with_pacing(config.pacing())
}

async fn select_period(config: &HrConfig, period: PeriodArgs) -> anyhow::Result<PayslipBrowser> {
    let mut browser = payslip_browser(config);
    if let Some(month) = period.month {
        browser.select_month(month)?;
    }
    if let Some(year) = period.year {
        browser.select_year(year)?;
    }
    browser.select_employee(period.employee);
    browser.open();
    browser.refresh().await?;
    Ok(browser)
}

async fn run_payslip(config: &HrConfig, command: PayslipCommand) -> anyhow::Result<()> {
    match command {
        PayslipCommand::List { period } => {
            let browser = select_period(config, period).await?;
            println!("{}", browser.period_label());
            println!("{}", browser.count_label());
            for record in browser.records() {
                println!(
                    "{:>6}  {:<28} {:>12.2}  {}",
                    record.id,
                    record.employee_name(),
                    record.net_salary,
                    record
                        .generated_at
                        .map(|d| d.date_naive().to_string())
                        .unwrap_or_default()
                );
            }
        }
        PayslipCommand::Download { record, period } => {
            let browser = select_period(config, period).await?;
            let Some(found) = browser.records().iter().find(|r| r.id == record) else {
                bail!("No payroll record {} in {}", record, browser.period_label());
            };
            if !browser.download_one(found).await {
                bail!("Payslip for record {} was not written", record);
            }
        }
        PayslipCommand::DownloadAll { period } => {
            let browser = select_period(config, period).await?;
            let result = browser.download_all().await;
            if result.failure_count > 0 {
                bail!("{} of {} payslip(s) failed", result.failure_count, result.total());
            }
        }
    }
    Ok(())
}
