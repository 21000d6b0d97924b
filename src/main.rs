use std::path::PathBuf;

use category_quiz::{Category, DEFAULT_DATA_DIR, Quiz, QuizConfig, logging};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing categories.json and one JSON file per category
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Category to quiz on ("All" or omitted for every category)
    #[arg(short, long)]
    category: Option<String>,

    /// Present questions in a random order
    #[arg(short, long)]
    shuffle: bool,

    /// Do not reveal correct answers after each question
    #[arg(long)]
    hide_answers: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Args> for QuizConfig {
    fn from(args: Args) -> Self {
        Self {
            data_dir: args.data_dir,
            category: Category::from_selector(args.category.as_deref()),
            shuffle_questions: args.shuffle,
            show_correct_answers: !args.hide_answers,
            log_file: args.log_file,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = QuizConfig::from(Args::parse());

    if let Some(path) = &config.log_file {
        if let Err(e) = logging::init(path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = Quiz::new(config).run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
