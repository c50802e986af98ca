//! Interactive menu: select HAR files, pick a destination folder, start.
//!
//! Selections live in a `Session`; a rejected start leaves them intact and
//! returns to the prompt, so the operator can fix the missing piece and try
//! again without re-entering everything.

use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;

use harpull_core::config::HarpullConfig;
use harpull_core::session::Session;

use super::report::ConsoleReporter;

pub fn run_menu(cfg: &HarpullConfig) -> Result<()> {
    let mut session = Session::new();
    print_menu();

    loop {
        let Some(choice) = read_input("\nSelect an option: ")? else {
            break;
        };
        match choice.to_lowercase().as_str() {
            "1" => select_files(&mut session)?,
            "2" => select_folder(&mut session)?,
            "3" => start_download(&mut session, cfg)?,
            "q" => break,
            _ => println!("Invalid option. Please choose 1, 2, 3 or q."),
        }
    }
    Ok(())
}

fn print_menu() {
    println!("harpull — image downloads from HAR captures");
    println!("  [1] Select HAR files");
    println!("  [2] Select download folder");
    println!("  [3] Start download");
    println!("  [q] Quit");
}

fn select_files(session: &mut Session) -> Result<()> {
    let Some(input) = read_input("HAR file paths (whitespace separated): ")? else {
        return Ok(());
    };
    let mut files = Vec::new();
    for raw in input.split_whitespace() {
        let path = PathBuf::from(raw);
        if path.is_file() {
            files.push(path);
        } else {
            println!("Skipping {raw}: not a file.");
        }
    }

    if files.is_empty() {
        println!("No HAR files selected.");
    } else {
        println!("Selected HAR files:");
        for (idx, file) in files.iter().enumerate() {
            println!("  {}- {}", idx + 1, file.display());
        }
    }
    session.select_files(files);
    Ok(())
}

fn select_folder(session: &mut Session) -> Result<()> {
    let Some(input) = read_input("Download folder: ")? else {
        return Ok(());
    };
    if input.is_empty() {
        println!("No download folder selected.");
        return Ok(());
    }
    let folder = PathBuf::from(input);
    println!("Selected download folder: {}", folder.display());
    session.select_folder(folder);
    Ok(())
}

fn start_download(session: &mut Session, cfg: &HarpullConfig) -> Result<()> {
    if let Err(err) = session.ready() {
        println!("{err}.");
        return Ok(());
    }

    let prompt = format!(
        "Number of parallel downloads (recommended: {}): ",
        cfg.default_concurrency
    );
    let input = read_input(&prompt)?.unwrap_or_default();
    let effective = session.set_concurrency_input(&input, cfg.default_concurrency);
    tracing::debug!(concurrency = effective, "starting batch run");

    let mut reporter = ConsoleReporter::new();
    let summaries = session.start(cfg, &mut reporter)?;
    println!("All downloads completed ({} HAR file(s)).", summaries.len());
    Ok(())
}

/// Prompt and read one trimmed line from stdin. `None` on EOF.
fn read_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
