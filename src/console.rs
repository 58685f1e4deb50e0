// 🖨️ Console presenter - non-interactive `list` / `types` output
//
// Buffers whatever the controller pushes; the binary prints it once the
// load cycle is over.

use crate::controller::Presenter;
use crate::entities::{capitalize, Pokemon};
use std::io::{self, Write};
use tracing::debug;

#[derive(Debug, Default)]
pub struct ConsolePresenter {
    pub rows: Vec<Pokemon>,
    pub type_options: Vec<String>,
    pub error: Option<String>,
    pub no_results: bool,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// One line per record: number, name, types, image
    pub fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.no_results {
            writeln!(out, "No Pokémon match the current filters.")?;
            return Ok(());
        }

        for p in &self.rows {
            let types: Vec<String> = p.types.iter().map(|t| capitalize(t)).collect();
            writeln!(
                out,
                "{:<6} {:<24} {:<22} {}",
                p.display_number(),
                p.display_name(),
                types.join(" "),
                p.image
            )?;
        }

        Ok(())
    }

    /// One type label per line, discovery order
    pub fn write_types<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for label in &self.type_options {
            writeln!(out, "{}", capitalize(label))?;
        }
        Ok(())
    }
}

impl Presenter for ConsolePresenter {
    fn show_loading(&mut self) {
        eprintln!("⏳ Loading Pokémon...");
    }

    fn hide_loading(&mut self) {
        debug!("load cycle finished");
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn set_no_results(&mut self, visible: bool) {
        self.no_results = visible;
    }

    fn render(&mut self, records: &[&Pokemon]) {
        debug!(count = records.len(), "render");
        self.rows = records.iter().map(|p| (*p).clone()).collect();
    }

    fn populate_types(&mut self, labels: &[String]) {
        self.type_options = labels.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_table() {
        let mut presenter = ConsolePresenter::new();
        let bulbasaur = Pokemon::new(
            1,
            "bulbasaur",
            "https://img.test/1.png",
            vec!["planta".to_string(), "veneno".to_string()],
        );
        presenter.render(&[&bulbasaur]);
        presenter.set_no_results(false);

        let mut out = Vec::new();
        presenter.write_table(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("#001"));
        assert!(text.contains("Bulbasaur"));
        assert!(text.contains("Planta Veneno"));
        assert!(text.trim_end().ends_with("https://img.test/1.png"));
    }

    #[test]
    fn test_write_table_no_results() {
        let mut presenter = ConsolePresenter::new();
        presenter.render(&[]);
        presenter.set_no_results(true);

        let mut out = Vec::new();
        presenter.write_table(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No Pokémon match the current filters.\n");
    }

    #[test]
    fn test_error_cleared() {
        let mut presenter = ConsolePresenter::new();
        presenter.show_error("boom");
        assert_eq!(presenter.error.as_deref(), Some("boom"));
        presenter.hide_error();
        assert!(presenter.error.is_none());
    }

    #[test]
    fn test_write_types() {
        let mut presenter = ConsolePresenter::new();
        presenter.populate_types(&["planta".to_string(), "fuego".to_string()]);

        let mut out = Vec::new();
        presenter.write_types(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Planta\nFuego\n");
    }
}
