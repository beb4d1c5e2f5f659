//! Interactive filter loop. Every filter change recomputes the view from
//! the deduplicated listing set; `atualizar` repeats the search, which the
//! query cache serves without a new request.

use crate::core::dashboard::Dashboard;
use crate::core::filter::ListingFilter;
use crate::core::{Pipeline, RadarReport};
use crate::domain::model::Sector;
use crate::presentation::report::render_view;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

const HELP: &str = "Comandos: setor <nome|todos>, bairro <nome|todos>, cargo <texto>, limpar, opcoes, atualizar, ajuda, sair";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sector(Option<Sector>),
    Neighborhood(Option<String>),
    Title(Option<String>),
    Clear,
    Options,
    Refresh,
    Help,
    Quit,
}

fn optional_arg(arg: &str) -> Option<String> {
    match arg.trim() {
        "" => None,
        a if a.eq_ignore_ascii_case("todos") => None,
        a => Some(a.to_string()),
    }
}

pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let (name, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match name.to_lowercase().as_str() {
        "setor" => match optional_arg(arg) {
            Some(label) => label.parse::<Sector>().map(|s| Command::Sector(Some(s))),
            None => Ok(Command::Sector(None)),
        },
        "bairro" => Ok(Command::Neighborhood(optional_arg(arg))),
        // cargo 不接受 "todos"，空字串才是清除
        "cargo" => Ok(Command::Title(Some(arg.trim().to_string()).filter(|t| !t.is_empty()))),
        "limpar" => Ok(Command::Clear),
        "opcoes" | "opções" => Ok(Command::Options),
        "atualizar" => Ok(Command::Refresh),
        "ajuda" | "help" | "?" => Ok(Command::Help),
        "sair" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("comando desconhecido: '{}'", other)),
    }
}

pub struct Session {
    dashboard: Dashboard,
    filter: ListingFilter,
    top: usize,
}

impl Session {
    pub fn new(report: &RadarReport, filter: ListingFilter, top: usize) -> Self {
        Self {
            dashboard: Dashboard::new(report.listings.clone()),
            filter,
            top,
        }
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    pub fn render(&self) -> String {
        render_view(&self.dashboard.view(&self.filter), self.top)
    }

    pub fn options(&self) -> String {
        let sectors: Vec<&str> = self
            .dashboard
            .sector_options()
            .iter()
            .map(|s| s.label())
            .collect();

        format!(
            "Setor Econômico: Todos, {}\nBairro: Todos, {}",
            sectors.join(", "),
            self.dashboard.neighborhood_options().join(", ")
        )
    }

    /// Applies a filter command. Returns true when the view changed.
    pub fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::Sector(sector) => self.filter.sector = *sector,
            Command::Neighborhood(neighborhood) => self.filter.neighborhood = neighborhood.clone(),
            Command::Title(title) => self.filter.title_contains = title.clone(),
            Command::Clear => self.filter = ListingFilter::default(),
            _ => return false,
        }
        true
    }

    pub fn replace_listings(&mut self, report: &RadarReport) {
        self.dashboard = Dashboard::new(report.listings.clone());
    }
}

pub async fn run_session<P, R, W>(
    pipeline: &P,
    mut session: Session,
    input: R,
    output: &mut W,
) -> Result<()>
where
    P: Pipeline,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", HELP)?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(output, "> ")?;
            output.flush()?;
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(output, "{}", HELP)?,
            Ok(Command::Options) => writeln!(output, "{}", session.options())?,
            Ok(Command::Refresh) => {
                let outcome = pipeline.extract().await?;
                let report = pipeline.transform(outcome).await?;
                for notice in &report.notices {
                    writeln!(output, "⚠ {}", notice.message())?;
                }
                session.replace_listings(&report);
                writeln!(output, "{}", session.render())?;
            }
            Ok(command) => {
                session.apply(&command);
                tracing::debug!("Filter changed: {:?}", session.filter());
                writeln!(output, "{}", session.render())?;
            }
            Err(message) => writeln!(output, "{}\n{}", message, HELP)?,
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    Ok(())
}
