use crate::console::display;
use crate::models::country::{is_valid_code, normalize_code, Country, CODE_LENGTH};
use crate::services::database::{DatabaseError, DatabaseService};
use crate::services::statistics;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("Input error: {0}")]
    Input(#[from] io::Error),
    #[error("Input ended")]
    EndOfInput,
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub const MENU_OPTIONS: [(&str, &str); 6] = [
    ("view", "View Countries data."),
    ("statistics", "View Internet users and literacy rate's statistics."),
    ("edit", "Edit country's information."),
    ("add", "Add a new country."),
    ("delete", "Delete a country."),
    ("quit", "Exit the program"),
];

const FAREWELL: &str = "See you later alligator :)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View,
    Statistics,
    Edit,
    Add,
    Delete,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let choice = input.trim().to_lowercase();
        match choice.as_str() {
            "view" => Command::View,
            "statistics" => Command::Statistics,
            "edit" => Command::Edit,
            "add" => Command::Add,
            "delete" => Command::Delete,
            "quit" => Command::Quit,
            _ => Command::Unknown(choice),
        }
    }
}

/// Menu loop over a line-oriented reader and writer.
pub struct Controller<'a, R, W> {
    db: &'a DatabaseService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Controller<'a, R, W> {
    pub fn new(db: &'a DatabaseService, input: R, output: W) -> Self {
        Self { db, input, output }
    }

    /// Runs until `quit` or end of input. Only a failure to write to the
    /// output ends the loop with an error.
    pub fn run(&mut self) -> Result<(), ControllerError> {
        loop {
            self.show_menu()?;

            let choice = match self.read_line() {
                Ok(line) => line,
                Err(ControllerError::EndOfInput) => {
                    debug!("Input closed, leaving menu loop");
                    writeln!(self.output, "{}", FAREWELL)?;
                    return Ok(());
                }
                Err(e) => {
                    error!("Problem with input: {}", e);
                    writeln!(self.output, "Problem with input")?;
                    continue;
                }
            };

            let command = Command::parse(&choice);
            debug!("Dispatching {:?}", command);

            if command == Command::Quit {
                writeln!(self.output, "{}", FAREWELL)?;
                return Ok(());
            }

            match self.dispatch(command) {
                Ok(()) => {}
                Err(ControllerError::EndOfInput) => {
                    writeln!(self.output, "{}", FAREWELL)?;
                    return Ok(());
                }
                Err(e) => self.report(e)?,
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<(), ControllerError> {
        match command {
            Command::View => self.view(),
            Command::Statistics => self.statistics(),
            Command::Edit => self.edit(),
            Command::Add => self.add(),
            Command::Delete => self.delete(),
            Command::Quit => Ok(()),
            Command::Unknown(choice) => {
                writeln!(self.output, "Unknown choice: '{}'. Try again.\n\n", choice)?;
                Ok(())
            }
        }
    }

    fn report(&mut self, err: ControllerError) -> Result<(), io::Error> {
        match &err {
            ControllerError::InvalidNumber(_) => {
                warn!("Operation aborted: {}", err);
                writeln!(self.output, "{}. Operation cancelled.", err)
            }
            ControllerError::Database(DatabaseError::DuplicateCode(_))
            | ControllerError::Database(DatabaseError::NotFound(_)) => {
                warn!("Operation rejected: {}", err);
                writeln!(self.output, "{}", err)
            }
            _ => {
                error!("Operation failed: {}", err);
                writeln!(self.output, "Operation failed: {}", err)
            }
        }
    }

    fn show_menu(&mut self) -> Result<(), io::Error> {
        writeln!(self.output, "\nWelcome. Your menu options are:\n")?;
        for (command, description) in MENU_OPTIONS {
            writeln!(self.output, "{:<10} - {}", command, description)?;
        }
        writeln!(self.output, "\n\nWhat would you like to do:")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> Result<String, ControllerError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ControllerError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    fn prompt(&mut self, message: &str) -> Result<String, ControllerError> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Blank input means the value is unknown.
    fn prompt_number(&mut self, message: &str) -> Result<Option<f64>, ControllerError> {
        let text = self.prompt(message)?;
        if text.is_empty() {
            return Ok(None);
        }
        parse_metric(&text)
            .map(Some)
            .ok_or(ControllerError::InvalidNumber(text))
    }

    fn view(&mut self) -> Result<(), ControllerError> {
        let countries = self.db.fetch_all()?;
        write!(self.output, "{}", display::render_countries(&countries))?;
        Ok(())
    }

    fn statistics(&mut self) -> Result<(), ControllerError> {
        let countries = self.db.fetch_all()?;
        let stats = statistics::compute(&countries);
        write!(self.output, "{}", display::render_statistics(&stats))?;
        Ok(())
    }

    /// Shows the table, asks for a code and resolves it. `None` means the
    /// user was already told nothing matched.
    fn select_country(&mut self, action: &str) -> Result<Option<Country>, ControllerError> {
        self.view()?;
        let message = format!(
            "Introduce the country code of the country you want to {}: ",
            action
        );
        let code = normalize_code(&self.prompt(&message)?);

        match self.db.fetch_by_code(&code)? {
            Some(country) => Ok(Some(country)),
            None => {
                writeln!(self.output, "No country found with code '{}'", code)?;
                Ok(None)
            }
        }
    }

    fn prompt_fields(&mut self, code: String) -> Result<Country, ControllerError> {
        let name = self.prompt("Introduce the new country name: ")?;
        let internet_users = self.prompt_number("Introduce the amount of Internet Users: ")?;
        let adult_literacy_rate =
            self.prompt_number("Introduce the amount of literacy rate of the country: ")?;

        Ok(Country::new(code, name, internet_users, adult_literacy_rate))
    }

    fn edit(&mut self) -> Result<(), ControllerError> {
        let Some(current) = self.select_country("edit")? else {
            return Ok(());
        };

        writeln!(self.output, "Current country data:")?;
        write!(self.output, "{}", display::render_country_details(&current))?;
        writeln!(self.output, "\nUpdating...\n")?;

        let updated = self.prompt_fields(current.code)?;
        self.db.update(&updated)?;

        writeln!(self.output, "Country update complete!")?;
        Ok(())
    }

    fn add(&mut self) -> Result<(), ControllerError> {
        let code = normalize_code(&self.prompt("Introduce the new country code: ")?);
        if !is_valid_code(&code) {
            writeln!(
                self.output,
                "Invalid code. It has to be {} characters long.",
                CODE_LENGTH
            )?;
            return Ok(());
        }

        let country = self.prompt_fields(code)?;
        self.db.create(&country)?;

        writeln!(self.output, "Country added successfully!")?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), ControllerError> {
        let Some(country) = self.select_country("delete")? else {
            return Ok(());
        };

        writeln!(self.output, "\nDeleting...\n")?;
        self.db.delete(&country)?;

        writeln!(self.output, "Country deleted successfully!")?;
        Ok(())
    }
}

/// Only finite values are accepted; SQLite would store NaN as NULL.
fn parse_metric(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
