mod settings;

use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use speakcheck_core::lesson::Lesson;
use speakcheck_core::pipeline::practice_logger::StdoutPracticeLogger;
use speakcheck_core::pipeline::practice_sentence_use_case::PracticeSentenceUseCase;
use speakcheck_core::practice::domain::practice_session::{
    AttemptOutcome, PracticeError, PracticeSession,
};
use speakcheck_core::practice::domain::recognition_error::RecognitionError;
use speakcheck_core::practice::infrastructure::line_transcript_provider::LineTranscriptProvider;
use speakcheck_core::quiz::domain::quiz_session::QuizSession;
use speakcheck_core::scoring::domain::match_category::MatchCategory;
use speakcheck_core::scoring::domain::pronunciation_scorer::{PronunciationScorer, ScoreBreakdown};
use speakcheck_core::scoring::domain::score_tier::ScoreTier;
use speakcheck_core::storage::domain::key_value_store::KeyValueStore;
use speakcheck_core::storage::infrastructure::json_file_store::JsonFileStore;
use speakcheck_core::storage::infrastructure::memory_store::MemoryStore;

use settings::Settings;

/// Pronunciation practice and listening quizzes in the terminal.
#[derive(Parser)]
#[command(name = "speakcheck")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a recognized transcript against a target sentence.
    Score {
        /// What the recognizer heard.
        transcript: String,

        /// The sentence the learner was asked to say.
        target: String,

        /// Show the per-word breakdown.
        #[arg(long)]
        details: bool,
    },

    /// Practice the sentences of a lesson, one typed transcript per line.
    Practice {
        /// Lesson JSON file.
        lesson: PathBuf,

        /// Do not read or write saved progress.
        #[arg(long)]
        no_save: bool,

        /// Progress store file (overrides settings).
        #[arg(long)]
        store: Option<PathBuf>,

        /// Show the per-word breakdown after each attempt.
        #[arg(long)]
        details: bool,
    },

    /// Take the listening quiz of a lesson.
    Quiz {
        /// Lesson JSON file.
        lesson: PathBuf,

        /// Do not read or write saved selections.
        #[arg(long)]
        no_save: bool,

        /// Progress store file (overrides settings).
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show or update saved settings.
    Config {
        /// Default progress store file.
        #[arg(long)]
        store: Option<PathBuf>,

        /// Always show per-word breakdowns (true/false).
        #[arg(long)]
        details: Option<bool>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let settings = Settings::load();

    match cli.command {
        Command::Score {
            transcript,
            target,
            details,
        } => run_score(&transcript, &target, details || settings.show_details),
        Command::Practice {
            lesson,
            no_save,
            store,
            details,
        } => {
            let store = open_store(no_save, store, &settings)?;
            run_practice(&lesson, store, details || settings.show_details)
        }
        Command::Quiz {
            lesson,
            no_save,
            store,
        } => {
            let store = open_store(no_save, store, &settings)?;
            run_quiz(&lesson, store)
        }
        Command::Config { store, details } => run_config(settings, store, details),
    }
}

fn run_score(
    transcript: &str,
    target: &str,
    details: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let breakdown = PronunciationScorer::evaluate(transcript, target);
    let tier = ScoreTier::from_pronunciation_score(breakdown.score);
    println!("{}/100 ({tier})", breakdown.score);
    if details {
        print_breakdown(&breakdown);
    }
    Ok(())
}

fn run_practice(
    lesson_path: &Path,
    mut store: Box<dyn KeyValueStore>,
    details: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let lesson = Lesson::load(lesson_path)?;
    if lesson.sentences.is_empty() {
        return Err(format!("Lesson has no sentences: {}", lesson_path.display()).into());
    }

    let mut session = PracticeSession::new(lesson.sentences.clone());
    let restored = session.restore_scores(store.as_ref())?;
    if restored > 0 {
        log::info!("Restored best scores for {restored} sentences");
    }

    let provider = LineTranscriptProvider::new(BufReader::new(io::stdin()));
    let mut use_case =
        PracticeSentenceUseCase::new(Box::new(provider), Box::new(StdoutPracticeLogger::new()));

    if !lesson.title.is_empty() {
        println!("{}\n", lesson.title);
    }
    println!("Type what you said after each prompt (Ctrl-D to stop).\n");

    let total = lesson.sentences.len();
    for (idx, sentence) in lesson.sentences.iter().enumerate() {
        println!("[{}/{total}] {}", idx + 1, sentence.text);
        if let Some(best) = session.best_score(&sentence.id) {
            println!("  best so far: {best}/100");
        }

        if !practice_sentence(&mut use_case, &mut session, &sentence.id, details)? {
            break;
        }
    }

    session.save_scores(store.as_mut())?;
    use_case.finish();

    let progress = session.progress();
    println!(
        "\nCompleted {}/{} sentences (attempted {}, average best {:.0}/100)",
        progress.completed, progress.total, progress.attempted, progress.average_best
    );
    Ok(())
}

/// Attempts one sentence until it is completed, the learner moves on with a
/// blank line after a low score, or input ends. Returns `false` once input
/// has ended.
fn practice_sentence(
    use_case: &mut PracticeSentenceUseCase,
    session: &mut PracticeSession,
    sentence_id: &str,
    details: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut retrying = false;
    loop {
        prompt("> ")?;
        match use_case.run(session, sentence_id) {
            Ok(Some(outcome)) => {
                print_outcome(&outcome, details);
                if outcome.completed {
                    return Ok(true);
                }
                println!("  Type it again to improve, or press Enter to move on.");
                retrying = true;
            }
            Ok(None) => {}
            Err(PracticeError::Recognition(RecognitionError::EndOfInput)) => {
                println!();
                return Ok(false);
            }
            Err(PracticeError::Recognition(RecognitionError::NoSpeech)) if retrying => {
                return Ok(true);
            }
            Err(PracticeError::Recognition(e)) if e.is_warning() => {
                println!("  {e}");
            }
            Err(PracticeError::Recognition(e)) => {
                println!("  {e}; skipping");
                return Ok(true);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn run_quiz(
    lesson_path: &Path,
    store: Box<dyn KeyValueStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let lesson = Lesson::load(lesson_path)?;
    if lesson.questions.is_empty() {
        return Err(format!("Lesson has no questions: {}", lesson_path.display()).into());
    }

    let mut quiz = QuizSession::restore(lesson.questions.clone(), store)?;
    let mut input = BufReader::new(io::stdin());

    println!("Enter an option number, blank to keep/skip, q to stop answering.\n");

    'questions: for (idx, question) in lesson.questions.iter().enumerate() {
        println!("{}. {}", idx + 1, question.prompt);
        for (opt, text) in question.options.iter().enumerate() {
            let marker = if quiz.selection(&question.id) == Some(opt) {
                "*"
            } else {
                " "
            };
            println!("  {marker}{}) {text}", opt + 1);
        }

        loop {
            prompt("> ")?;
            let Some(line) = read_line(&mut input)? else {
                break 'questions;
            };
            let answer = line.trim();
            if answer.is_empty() {
                break;
            }
            if answer.eq_ignore_ascii_case("q") {
                break 'questions;
            }
            let choice = match answer.parse::<usize>() {
                Ok(n) if n >= 1 => n - 1,
                _ => {
                    println!("  enter a number between 1 and {}", question.options.len());
                    continue;
                }
            };
            match quiz.select_answer(&question.id, choice) {
                Ok(()) => break,
                Err(e) => println!("  {e}"),
            }
        }
        println!();
    }

    let unanswered = quiz.unanswered().len();
    if unanswered > 0 {
        let answered = quiz.questions().len() - unanswered;
        prompt(&format!(
            "You answered {answered}/{} questions. Submit anyway? [y/N] ",
            quiz.questions().len()
        ))?;
        let confirmed = read_line(&mut input)?
            .map(|l| l.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false);
        if !confirmed {
            println!("\nSelections kept; run the quiz again to continue.");
            return Ok(());
        }
    }

    let result = quiz.submit()?;
    println!();
    for (idx, (outcome, question)) in result.outcomes.iter().zip(quiz.questions()).enumerate() {
        let mark = if outcome.is_correct() { "✓" } else { "✗" };
        let answer = &question.options[outcome.correct_option];
        println!("{mark} {}. {} (answer: {answer})", idx + 1, question.prompt);
    }
    println!(
        "\nScore: {}/{} ({:.1}%) - {}",
        result.correct(),
        result.total(),
        result.percentage(),
        result.tier()
    );
    println!("{}", result.feedback());
    Ok(())
}

fn run_config(
    mut settings: Settings,
    store: Option<PathBuf>,
    details: Option<bool>,
) -> Result<(), Box<dyn std::error::Error>> {
    let changed = store.is_some() || details.is_some();
    if let Some(path) = store {
        settings.store_path = Some(path);
    }
    if let Some(details) = details {
        settings.show_details = details;
    }
    if changed {
        let path = settings.save()?;
        log::info!("Settings written to {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Practice {
            lesson,
            no_save,
            store,
            ..
        }
        | Command::Quiz {
            lesson,
            no_save,
            store,
        } => {
            if !lesson.exists() {
                return Err(format!("Lesson file not found: {}", lesson.display()).into());
            }
            if *no_save && store.is_some() {
                return Err("--no-save and --store are mutually exclusive".into());
            }
        }
        Command::Config {
            store: Some(path), ..
        } => {
            if path.is_dir() {
                return Err(format!("Store path is a directory: {}", path.display()).into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn open_store(
    no_save: bool,
    store_override: Option<PathBuf>,
    settings: &Settings,
) -> Result<Box<dyn KeyValueStore>, Box<dyn std::error::Error>> {
    if no_save {
        return Ok(Box::new(MemoryStore::new()));
    }
    let store = match store_override.or_else(|| settings.store_path.clone()) {
        Some(path) => JsonFileStore::open(&path)?,
        None => JsonFileStore::open_default()?,
    };
    log::debug!("Using progress store {}", store.path().display());
    Ok(Box::new(store))
}

fn print_outcome(outcome: &AttemptOutcome, details: bool) {
    let best = if outcome.is_new_best { "  new best!" } else { "" };
    let done = if outcome.completed { " ✓" } else { "" };
    println!("  {}/100 ({}){done}{best}", outcome.score, outcome.tier);
    if details {
        print_breakdown(&outcome.breakdown);
    }
    println!();
}

fn print_breakdown(b: &ScoreBreakdown) {
    for word in &b.words {
        let heard = word.spoken.as_deref().unwrap_or("-");
        let category = match word.best.category {
            MatchCategory::None => "missed".to_string(),
            other => other.to_string(),
        };
        println!(
            "    {:<14} {:<14} {:<9} {:>3}",
            word.target, heard, category, word.best.score
        );
    }
    println!(
        "    perfect {}/{}  partial {}/{}  base {}  ratio bonus {:+}  length bonus {:+}{}",
        b.perfect_matches,
        b.target_word_count(),
        b.partial_matches,
        b.target_word_count(),
        b.base_accuracy,
        b.ratio_bonus,
        b.length_bonus,
        if b.low_match_penalty_applied {
            "  low-match penalty"
        } else {
            ""
        }
    );
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
