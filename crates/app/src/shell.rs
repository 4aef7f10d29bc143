//! Line-oriented front end driving a [`Session`].

use std::io::Write;

use chrono::Utc;
use client::{Session, TransactionBackend};
use engine::{Formatter, Selector, TransactionId, TransactionKind, categories};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::Result;

const HELP: &str = "\
commands:
  type income|expense    switch kind (resets category)
  amount <value>         set amount
  category <label>       set category
  note [text]            set or clear note
  form                   show the form
  submit                 save the form
  rm <id>                remove a transaction
  filter all|income|expense
  list                   show the filtered ledger
  totals                 income, expense and balance
  categories             suggestions for the current kind
  quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Kind(TransactionKind),
    Amount(String),
    Category(String),
    Note(String),
    Form,
    Submit,
    Remove(String),
    Filter(Selector),
    List,
    Totals,
    Categories,
    Quit,
}

impl Command {
    fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match head {
            "help" | "?" => Self::Help,
            "type" => Self::Kind(TransactionKind::try_from(rest).map_err(|err| err.to_string())?),
            "amount" => Self::Amount(rest.to_string()),
            "category" => Self::Category(rest.to_string()),
            "note" => Self::Note(rest.to_string()),
            "form" => Self::Form,
            "submit" => Self::Submit,
            "rm" if !rest.is_empty() => Self::Remove(rest.to_string()),
            "rm" => return Err("usage: rm <id>".to_string()),
            "filter" => Self::Filter(Selector::try_from(rest).map_err(|err| err.to_string())?),
            "list" | "ls" => Self::List,
            "totals" => Self::Totals,
            "categories" => Self::Categories,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command: {other} (try `help`)")),
        };
        Ok(command)
    }
}

pub struct Shell<B> {
    session: Session<B>,
    formatter: Formatter,
}

impl<B: TransactionBackend> Shell<B> {
    pub fn new(session: Session<B>, formatter: Formatter) -> Self {
        Self { session, formatter }
    }

    pub async fn run<R, W>(&mut self, input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{HELP}")?;
        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            if !self.handle(&line, &mut out).await? {
                break;
            }
        }
        Ok(())
    }

    /// Runs one command. Returns `false` when the shell should exit.
    async fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                return Ok(true);
            }
        };

        match command {
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Kind(kind) => {
                self.session.set_kind(kind);
                self.write_form(out)?;
            }
            Command::Amount(amount) => self.session.form.amount = amount,
            Command::Category(category) => self.session.form.category = category,
            Command::Note(note) => self.session.form.note = note,
            Command::Form => self.write_form(out)?,
            Command::Submit => match self.session.submit().await {
                Ok(saved) => writeln!(out, "saved {}", self.formatter.row(&saved, Utc::now()))?,
                Err(_) => {
                    writeln!(out, "error: {}", self.session.error().unwrap_or_default())?;
                }
            },
            Command::Remove(id) => {
                // Unknown or malformed ids are a no-op, like any other missing id.
                if let Ok(id) = TransactionId::new(id) {
                    self.session.delete(&id);
                }
                self.write_totals(out)?;
            }
            Command::Filter(selector) => {
                self.session.set_selector(selector);
                self.write_list(out)?;
            }
            Command::List => self.write_list(out)?,
            Command::Totals => self.write_totals(out)?,
            Command::Categories => {
                let kind = self.session.form.kind;
                writeln!(out, "{}", categories::suggestions(kind).join(", "))?;
            }
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn write_form<W: Write>(&self, out: &mut W) -> Result<()> {
        let form = &self.session.form;
        writeln!(
            out,
            "{} | amount: {} | category: {} | note: {}",
            self.formatter.kind_label(form.kind),
            form.amount,
            form.category,
            form.note
        )?;
        Ok(())
    }

    fn write_list<W: Write>(&self, out: &mut W) -> Result<()> {
        let counts = self.session.counts();
        let tab = |selector: Selector, count: usize| {
            let marker = if self.session.selector() == selector { "*" } else { "" };
            format!("{marker}{selector} ({count})")
        };
        writeln!(
            out,
            "{} | {} | {}",
            tab(Selector::All, counts.all),
            tab(TransactionKind::Income.into(), counts.income),
            tab(TransactionKind::Expense.into(), counts.expense),
        )?;

        let now = Utc::now();
        let visible = self.session.visible();
        if visible.is_empty() {
            writeln!(out, "(no transactions)")?;
        }
        for tx in visible {
            writeln!(out, "{}", self.formatter.row(tx, now))?;
        }
        Ok(())
    }

    fn write_totals<W: Write>(&self, out: &mut W) -> Result<()> {
        let totals = self.session.totals();
        writeln!(
            out,
            "income {}  expense {}  balance {}",
            totals.income,
            totals.expense,
            totals.balance()
        )?;
        Ok(())
    }
}
