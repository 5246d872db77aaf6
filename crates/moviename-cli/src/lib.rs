use rand::prelude::IndexedRandom;
use std::time::Duration;
use tokio::task::JoinHandle;

use moviename_core::share::{search_url, SHARE_QUERY_PARAM};
use moviename_core::MovieMatch;
use moviename_session::UploadSession;

/// Shown while a submission is running.
pub const TRIVIA_FACTS: &[&str] = &[
    "The average movie takes about 106 days to film?",
    "The first movie theater opened in 1905 in Pittsburgh?",
    "Alfred Hitchcock never won an Oscar for Best Director?",
    "The Wilhelm Scream has been used in over 400 films?",
    "The longest movie ever made is 87 hours long?",
    "Charlie Chaplin once lost a Charlie Chaplin look-alike contest?",
    "The movie 'Titanic' cost more to make than the actual Titanic?",
    "Walt Disney was afraid of mice despite creating Mickey Mouse?",
    "The code in 'The Matrix' is actually sushi recipes?",
    "Steven Spielberg was rejected from film school three times?",
    "The first film sequel was made in 1916?",
    "Movie theaters make most of their profit from concessions?",
    "The loudest sound in cinema history was in 'Interstellar'?",
    "Tom Hanks' brother voiced Woody in the Toy Story video games?",
];

/// Seconds between trivia changes.
pub const TRIVIA_ROTATION_SECS: u64 = 3;

pub const ERROR_HEADLINE: &str = "Something went wrong while processing your request.";

pub fn random_trivia() -> &'static str {
    TRIVIA_FACTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or_default()
}

pub fn progress_line(elapsed_secs: u64, trivia: &str) -> String {
    format!(
        "[{}s] Searching the reel for answers... Do you know? {}",
        elapsed_secs, trivia
    )
}

/// Text of the failure dialog.
pub fn error_dialog(message: &str) -> String {
    let message = if message.trim().is_empty() {
        "An unknown error occurred."
    } else {
        message
    };
    format!("Oops! Error\n{}\n{}", ERROR_HEADLINE, message)
}

/// Human summary of a match.
pub fn render_movie(movie: &MovieMatch, share_link: Option<&str>) -> String {
    let mut lines = Vec::new();
    match movie.release_year() {
        Some(year) => lines.push(format!("{} ({})", movie.title, year)),
        None => lines.push(movie.title.clone()),
    }
    if let Some(rating) = movie.rating_label() {
        lines.push(format!("Rating: {}/10", rating));
    }
    if !movie.overview.is_empty() {
        lines.push(truncate_string(&movie.overview, 300));
    }
    if !movie.poster_url.is_empty() {
        lines.push(format!("Poster: {}", movie.poster_url));
    }
    lines.push(format!("Watch: {}", search_url(&movie.title)));
    if let Some(link) = share_link {
        lines.push(format!("Share: {}", link));
    }
    lines.join("\n")
}

/// Accepts a bare token or a full share link.
pub fn share_token_from_input(input: &str) -> &str {
    let needle = format!("{}=", SHARE_QUERY_PARAM);
    match input.find(&needle) {
        Some(start) => {
            let rest = &input[start + needle.len()..];
            rest.split(['&', '#']).next().unwrap_or(rest)
        }
        None => input.trim(),
    }
}

/// Prints elapsed seconds and rotating trivia to stderr until the
/// submission leaves the active states or the handle is aborted.
pub fn spawn_progress_reporter(session: UploadSession) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rx = session.subscribe();
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        let mut trivia = random_trivia();
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if ticks > 0 && ticks % TRIVIA_ROTATION_SECS == 0 {
                        trivia = random_trivia();
                    }
                    ticks += 1;
                    eprintln!("{}", progress_line(session.elapsed_secs(), trivia));
                }
                changed = rx.changed() => {
                    if changed.is_err() || rx.borrow_and_update().is_terminal() {
                        break;
                    }
                }
            }
        }
    })
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,moviename=info")),
        )
        .init();
}
