//! Interactive console shell for CrewDeck.
//!
//! # Responsibility
//! - Drive `crewdeck_core` through the menu commands, one service call per
//!   command.
//! - Keep all prompting and input parsing out of the core crate.
//!
//! # Invariants
//! - A failed core call is reported and the menu loop continues.
//! - The shell never mutates entities directly; every mutation goes through
//!   the allocation service.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crewdeck_core::{
    default_log_level, init_logging, AllocationService, FileTransactionLog, MaintainOutcome,
    Registry, ResourceKind, ServiceError, TransactionLog,
};

const DEFAULT_JOURNAL_PATH: &str = "resource_log.txt";

const MENU: &str = "1. Add Resource\n\
                    2. Use Resource\n\
                    3. Maintain Resource\n\
                    4. Add Project\n\
                    5. Allocate Resource to Project\n\
                    6. Display Resource State\n\
                    7. Exit";

fn main() {
    if let Ok(log_dir) = std::env::var("CREWDECK_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("diagnostics disabled: {err}");
        }
    }

    let journal_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CREWDECK_JOURNAL").ok())
        .unwrap_or_else(|| DEFAULT_JOURNAL_PATH.to_string());

    let mut service =
        AllocationService::new(Registry::new(), FileTransactionLog::new(journal_path));

    let stdin = io::stdin();
    let mut input = TokenReader::new(stdin.lock());

    loop {
        println!("{MENU}");
        prompt("Enter your choice: ");
        let Some(choice) = input.next_token() else {
            break;
        };

        match choice.as_str() {
            "1" => add_resource(&mut service, &mut input),
            "2" => use_resource(&mut service, &mut input),
            "3" => maintain_resource(&mut service, &mut input),
            "4" => add_project(&mut service, &mut input),
            "5" => allocate_resource(&mut service, &mut input),
            "6" => display_resource_state(&service, &mut input),
            "7" => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn add_resource<J, R>(service: &mut AllocationService<J>, input: &mut TokenReader<R>)
where
    J: TransactionLog,
    R: BufRead,
{
    prompt("Enter Resource ID to add: ");
    let Some(id) = input.next_token() else { return };
    prompt("Select Resource Type (1. Worker, 2. Equipment): ");
    let Some(selector) = input.next_token() else { return };
    // any selector other than 1 falls back to equipment
    let kind = if selector == "1" {
        ResourceKind::Worker
    } else {
        ResourceKind::Equipment
    };

    match service.register_resource(&id, kind) {
        Ok(()) => println!("Resource {id} of type {} added.", kind.label()),
        Err(err) => report(&err),
    }
}

fn use_resource<J, R>(service: &mut AllocationService<J>, input: &mut TokenReader<R>)
where
    J: TransactionLog,
    R: BufRead,
{
    prompt("Enter Resource ID to use: ");
    let Some(id) = input.next_token() else { return };

    match service.mark_in_use(&id) {
        Ok(()) => println!("Resource {id} is now in use."),
        Err(err) => report(&err),
    }
}

fn maintain_resource<J, R>(service: &mut AllocationService<J>, input: &mut TokenReader<R>)
where
    J: TransactionLog,
    R: BufRead,
{
    prompt("Enter Resource ID to maintain: ");
    let Some(id) = input.next_token() else { return };

    match service.maintain(&id) {
        Ok(MaintainOutcome::UnderMaintenance) => {
            println!("Resource {id} is under maintenance.");
        }
        Ok(MaintainOutcome::NotEligible) => {
            println!("Resource {id} is not equipment and cannot be maintained.");
        }
        Err(err) => report(&err),
    }
}

fn add_project<J, R>(service: &mut AllocationService<J>, input: &mut TokenReader<R>)
where
    J: TransactionLog,
    R: BufRead,
{
    prompt("Enter Project ID to add: ");
    let Some(id) = input.next_token() else { return };
    prompt("Enter Project Name: ");
    let Some(name) = input.next_line() else { return };

    match service.register_project(&id, &name) {
        Ok(()) => println!("Project {id} named {name} added."),
        Err(err) => report(&err),
    }
}

fn allocate_resource<J, R>(service: &mut AllocationService<J>, input: &mut TokenReader<R>)
where
    J: TransactionLog,
    R: BufRead,
{
    prompt("Enter Resource ID to allocate: ");
    let Some(resource_id) = input.next_token() else { return };
    prompt("Enter Project ID to allocate to: ");
    let Some(project_id) = input.next_token() else { return };

    match service.allocate(&resource_id, &project_id) {
        Ok(()) => println!("Resource {resource_id} allocated to project {project_id}."),
        Err(err) => report(&err),
    }
}

fn display_resource_state<J, R>(service: &AllocationService<J>, input: &mut TokenReader<R>)
where
    J: TransactionLog,
    R: BufRead,
{
    prompt("Enter Resource ID to display state: ");
    let Some(id) = input.next_token() else { return };

    match service.describe_state(&id) {
        Ok(description) => println!("Resource {id} is {description}."),
        Err(err) => report(&err),
    }
}

fn report(err: &ServiceError) {
    eprintln!("Error: {err}");
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

/// Whitespace-token reader with line-at-a-time access for free-text fields.
struct TokenReader<R: BufRead> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next whitespace-delimited token, reading further lines as
    /// needed. `None` means end of input.
    fn next_token(&mut self) -> Option<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line).ok()? == 0 {
                return None;
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Returns the rest of the current line, or the next line, for fields
    /// that may contain spaces.
    fn next_line(&mut self) -> Option<String> {
        if !self.pending.is_empty() {
            let tokens: Vec<String> = self.pending.drain(..).collect();
            return Some(tokens.join(" "));
        }
        let mut line = String::new();
        if self.reader.read_line(&mut line).ok()? == 0 {
            return None;
        }
        Some(line.trim().to_string())
    }
}
