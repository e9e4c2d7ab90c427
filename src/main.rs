mod api;
mod batch;
mod generator;
mod server;

use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use adcopy_lab::config::EngineConfig;
use adcopy_lab::optimizer::{optimize_description, optimize_headline, OptimizationResult};
use adcopy_lab::predict::PerformancePredictor;
use adcopy_lab::scoring::{score_ad, score_description, score_headline};
use adcopy_lab::variation::{build_tone_test, BaseAdSource, ToneTest, VariationPlan};
use adcopy_lab::winner::{ObservedMetrics, WinnerSelector};
use adcopy_lab::{format_float, format_number, format_percent, ScoredField};

#[derive(Parser)]
#[command(name = "adcopy-lab", about = "Ad copy scoring and A/B comparison")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score one headline or description
    Score(ScoreArgs),
    /// Score a full ad (all headlines and descriptions)
    ScoreAd(ScoreAdArgs),
    /// Rewrite a field toward a target score
    Optimize(OptimizeArgs),
    /// Build tone variations and predict their performance
    Compare(CompareArgs),
    /// Pick a winner from observed test metrics
    Winner(WinnerArgs),
    /// Serve the HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long)]
    text: Option<String>,
    /// Score as a description instead of a headline
    #[arg(long)]
    description: bool,
    #[arg(long = "keyword")]
    keywords: Vec<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct ScoreAdArgs {
    #[arg(long = "headline")]
    headlines: Vec<String>,
    #[arg(long = "description")]
    descriptions: Vec<String>,
    #[arg(long = "keyword")]
    keywords: Vec<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct OptimizeArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    description: bool,
    #[arg(long = "keyword")]
    keywords: Vec<String>,
    #[arg(long)]
    target_score: Option<f64>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct CompareArgs {
    #[arg(long = "keyword", required = true)]
    keywords: Vec<String>,
    /// Variation kinds to build, in label order (A, B, C, ...)
    #[arg(long = "tone")]
    tones: Vec<String>,
    #[arg(long, default_value_t = 15)]
    num_headlines: usize,
    #[arg(long, default_value_t = 4)]
    num_descriptions: usize,
    /// Generate copy with the configured AI endpoint
    #[arg(long)]
    ai: bool,
    /// Base copy to slice into variations when --ai is not used
    #[arg(long = "headline")]
    headlines: Vec<String>,
    #[arg(long = "description")]
    descriptions: Vec<String>,
    #[arg(long)]
    business_type: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct WinnerArgs {
    /// JSON file mapping variation labels to observed metrics; stdin if omitted
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    min_clicks: Option<u64>,
    #[arg(long)]
    min_confidence: Option<f64>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8788)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _) = EngineConfig::load(None)?;

    match cli.command {
        Command::Score(args) => run_score(args),
        Command::ScoreAd(args) => run_score_ad(args),
        Command::Optimize(args) => run_optimize(args, &config),
        Command::Compare(args) => run_compare(args, &config).await,
        Command::Winner(args) => run_winner(args, &config),
        Command::Serve(args) => server::serve(args, config).await,
    }
}

fn run_score(args: ScoreArgs) -> Result<(), String> {
    let text = read_text(args.text)?;
    let keywords = keyword_slice(&args.keywords);
    let field = if args.description {
        score_description(&text, keywords)
    } else {
        score_headline(&text, keywords)
    };

    if args.json {
        return print_json(&field);
    }
    print_field(&field);
    Ok(())
}

fn run_score_ad(args: ScoreAdArgs) -> Result<(), String> {
    let report = score_ad(
        &args.headlines,
        &args.descriptions,
        keyword_slice(&args.keywords),
    );

    if args.json {
        return print_json(&report);
    }

    println!(
        "Overall score: {}/10 ({})",
        format_float(report.overall_score, 1),
        report.overall_grade.label()
    );
    println!(
        "Headlines: {}/10 | Descriptions: {}/10",
        format_float(report.avg_headline_score, 1),
        format_float(report.avg_description_score, 1)
    );
    println!(
        "Diversity: {}/10 | Issues: {}",
        format_float(report.diversity_score, 1),
        report.total_issues
    );

    if let Some(analysis) = &report.keyword_analysis {
        println!(
            "Keywords used: {}/{} ({}%)",
            analysis.used,
            analysis.total,
            format_float(analysis.usage_rate_percent, 1)
        );
        if !analysis.unused.is_empty() {
            println!("  unused: {}", analysis.unused.join(", "));
        }
    }

    println!("\n{}", report.summary);

    println!("\nRecommendations:");
    for recommendation in &report.top_recommendations {
        println!("- {}", recommendation);
    }

    Ok(())
}

fn run_optimize(args: OptimizeArgs, config: &EngineConfig) -> Result<(), String> {
    let text = read_text(args.text)?;
    let keywords = keyword_slice(&args.keywords);
    let target = args
        .target_score
        .unwrap_or(config.optimizer.target_score);

    let result: OptimizationResult = if args.description {
        optimize_description(&text, keywords, target)
    } else {
        optimize_headline(&text, keywords, target)
    };

    if args.json {
        return print_json(&result);
    }

    println!("Original:  {}", result.original);
    println!("Optimized: {}", result.optimized);
    println!(
        "Score: {} -> {} ({}{})",
        format_float(result.initial_score, 1),
        format_float(result.final_score, 1),
        if result.improvement >= 0.0 { "+" } else { "" },
        format_float(result.improvement, 1)
    );
    println!(
        "Meets target: {}",
        if result.meets_target { "yes" } else { "no" }
    );
    if !result.improvements_applied.is_empty() {
        println!("\nApplied:");
        for improvement in &result.improvements_applied {
            println!("- {}", improvement);
        }
    }

    Ok(())
}

async fn run_compare(args: CompareArgs, config: &EngineConfig) -> Result<(), String> {
    let kinds = if args.tones.is_empty() {
        vec![
            "emocional".to_string(),
            "urgente".to_string(),
            "profesional".to_string(),
        ]
    } else {
        args.tones.clone()
    };

    let mut plan = VariationPlan::new(args.keywords.clone(), kinds);
    plan.num_headlines = args.num_headlines;
    plan.num_descriptions = args.num_descriptions;

    let test: ToneTest = if args.ai {
        let client = generator::GeneratorClient::from_env(&config.generator)
            .ok_or_else(|| "ADCOPY_API_KEY is not set".to_string())?;
        batch::generate_tone_test(&client, &plan, config.generator.max_workers).await
    } else {
        let mut source = BaseAdSource::new(args.headlines.clone(), args.descriptions.clone());
        build_tone_test(&plan, &mut source)
    };

    let business_type = args
        .business_type
        .clone()
        .unwrap_or_else(|| config.predictor.business_type.clone());
    let predictor = PerformancePredictor::new(business_type);
    let predictions = predictor.predict_set(&test.variations);

    if args.json {
        let payload = serde_json::json!({
            "test": test,
            "predictions": predictions,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload)
                .map_err(|err| format!("failed to serialize output: {}", err))?
        );
        return Ok(());
    }

    println!("Test {} with {} variation(s)", test.test_id, test.variations.len());
    for warning in &test.warnings {
        println!("  warning: {}", warning);
    }

    for variation in &test.variations {
        let report = score_ad(
            &variation.headlines,
            &variation.descriptions,
            keyword_slice(&test.keywords),
        );
        println!(
            "\nVariation {} ({}): {} headline(s), {} description(s)",
            variation.label,
            variation.tone,
            variation.headlines.len(),
            variation.descriptions.len()
        );
        println!(
            "  copy score: {}/10 ({})",
            format_float(report.overall_score, 1),
            report.overall_grade.label()
        );
    }

    println!("\nPredictions:");
    for prediction in &predictions.predictions {
        println!(
            "  {} ({}): CTR {}% | quality {}/10 | CPC ${} | confidence {}",
            prediction.variation_label,
            prediction.tone,
            format_float(prediction.predicted_ctr, 2),
            format_float(prediction.quality_score, 1),
            format_float(prediction.estimated_cpc, 2),
            format_float(prediction.confidence, 2)
        );
        if !prediction.features_detected.is_empty() {
            println!("    features: {}", prediction.features_detected.join(", "));
        }
    }

    if let Some(best) = &predictions.best_predicted {
        println!(
            "\nPredicted winner: {} at {}% CTR ({})",
            best.variation_label,
            format_float(best.predicted_ctr, 2),
            best.reason
        );
    }
    println!(
        "Prediction confidence: {}",
        predictions.confidence_level.label()
    );

    println!("\nRecommendations:");
    for recommendation in &test.recommendations {
        println!("- {}", recommendation);
    }

    Ok(())
}

fn run_winner(args: WinnerArgs, config: &EngineConfig) -> Result<(), String> {
    let payload = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read metrics file: {}", err))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed reading stdin: {}", err))?;
            buffer
        }
    };

    let observed: BTreeMap<String, ObservedMetrics> = serde_json::from_str(&payload)
        .map_err(|err| format!("failed to parse metrics JSON: {}", err))?;

    let selector = WinnerSelector::new(
        args.min_clicks.unwrap_or(config.winner.min_clicks),
        args.min_confidence.unwrap_or(config.winner.min_confidence),
    );
    let decision = selector.recommend_winner(&observed);

    if args.json {
        return print_json(&decision);
    }

    match &decision.winner_label {
        Some(label) => {
            println!(
                "Winner: variation {} (confidence {}, {})",
                label,
                format_percent(decision.statistical_confidence),
                if decision.is_significant {
                    "significant"
                } else {
                    "not significant"
                }
            );
        }
        None => println!("No winner yet: not enough data"),
    }

    for (label, score) in &decision.variation_scores {
        println!(
            "  {}: composite {} | CTR {}% | conv {}% | CPC ${} | impressions {}",
            label,
            format_float(score.composite_score, 2),
            format_float(score.ctr, 2),
            format_float(score.conversion_rate, 2),
            format_float(score.cpc, 2),
            format_number(score.impressions as f64)
        );
    }

    if !decision.insufficient_data.is_empty() {
        println!("\nInsufficient data:");
        for entry in &decision.insufficient_data {
            println!(
                "  {}: {}/{} clicks",
                entry.label, entry.observed_count, entry.required_count
            );
        }
    }

    println!("\nNext steps:");
    for step in &decision.next_steps {
        println!("- {}", step);
    }

    Ok(())
}

fn print_field(field: &ScoredField) {
    println!(
        "Score: {}/10 ({}) - {} chars",
        format_float(field.score, 1),
        field.grade.label(),
        field.length
    );
    if !field.issues.is_empty() {
        println!("\nIssues:");
        for issue in &field.issues {
            println!("- {}", issue);
        }
    }
    if !field.strengths.is_empty() {
        println!("\nStrengths:");
        for strength in &field.strengths {
            println!("- {}", strength);
        }
    }
    if !field.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &field.recommendations {
            println!("- {}", recommendation);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize output: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn keyword_slice(keywords: &[String]) -> Option<&[String]> {
    if keywords.is_empty() {
        None
    } else {
        Some(keywords)
    }
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing ad text: pass --text or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
