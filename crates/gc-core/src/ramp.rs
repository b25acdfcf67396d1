use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Built-in default ramp, darkest → brightest. Always present at index 0.
pub const DEFAULT_RAMP: &str = " .:-=+*#%@";

/// Maximum number of ramps in a registry (default included). Extra table
/// lines are silently discarded.
pub const MAX_RAMPS: usize = 8;

/// Conventional table filename tried when no `-f` path is given.
/// Its absence is not an error.
pub const DEFAULT_TABLE_FILE: &str = "ascii.tbl";

/// Table de correspondance luminosité → glyphe, du plus sombre au plus
/// clair. Invariant : au moins un glyphe, immuable après chargement.
///
/// # Example
/// ```
/// use gc_core::ramp::Ramp;
/// let ramp = Ramp::parse(" #").unwrap();
/// assert_eq!(ramp.len(), 2);
/// assert_eq!(ramp.glyph(1), '#');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ramp {
    glyphs: Vec<char>,
}

impl Ramp {
    /// Parse one table-file line into a ramp.
    ///
    /// Trailing whitespace (including the newline) is stripped. Lines that
    /// trim to nothing yield `None`: an empty ramp would violate the ≥ 1
    /// glyph invariant, so such lines are skipped rather than loaded.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            glyphs: trimmed.chars().collect(),
        })
    }

    /// Number of glyphs. Always ≥ 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// A ramp is never empty; kept for clippy's len/is_empty pairing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`.
    ///
    /// # Panics
    /// Out-of-bounds index is a caller bug (the quantizer guarantees
    /// in-bounds indices for this ramp's length).
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index]
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_RAMP.chars().collect(),
        }
    }
}

/// Registre de ramps : défaut built-in en position 0, puis jusqu'à
/// [`MAX_RAMPS`] − 1 entrées lues depuis un fichier table.
///
/// Invariant : `selected < count()` et `count() ≥ 1`, donc la navigation
/// avec wraparound ne peut jamais échouer.
///
/// # Example
/// ```
/// use gc_core::ramp::RampSet;
/// let mut set = RampSet::load(None);
/// assert!(set.count() >= 1);
/// set.next();
/// assert_eq!(set.selected_index(), 0); // single entry wraps onto itself
/// ```
pub struct RampSet {
    ramps: Vec<Ramp>,
    selected: usize,
}

impl RampSet {
    /// Load the registry: built-in default first, then the optional table
    /// file, one ramp per line, file order, capped at [`MAX_RAMPS`] total.
    ///
    /// Severity split per the table-store contract:
    /// - explicit path that cannot be opened → `log::warn`, degrade to the
    ///   default-only registry (non-fatal configuration error);
    /// - omitted path → [`DEFAULT_TABLE_FILE`] is tried and its absence is
    ///   silent.
    #[must_use]
    pub fn load(table_file: Option<&Path>) -> Self {
        let mut set = Self {
            ramps: vec![Ramp::default()],
            selected: 0,
        };

        let default_path = Path::new(DEFAULT_TABLE_FILE);
        let (path, explicit) = match table_file {
            Some(p) => (p, true),
            None => (default_path, false),
        };

        match File::open(path) {
            Ok(file) => set.read_table(BufReader::new(file)),
            Err(e) if explicit => {
                log::warn!("Table file {} unreadable: {e}", path.display());
            }
            Err(_) => {
                log::debug!("No {} in working directory", path.display());
            }
        }

        set
    }

    fn read_table<R: BufRead>(&mut self, reader: R) {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                // Truncated or non-UTF-8 table: keep what was parsed so
                // far, same non-fatal severity as an unreadable file.
                Err(e) => {
                    log::warn!("Table read interrupted: {e}");
                    break;
                }
            };
            if self.ramps.len() >= MAX_RAMPS {
                log::debug!("Table cap reached ({MAX_RAMPS}), ignoring remaining lines");
                break;
            }
            // Empty lines are skipped and do not count toward the cap.
            if let Some(ramp) = Ramp::parse(&line) {
                self.ramps.push(ramp);
            }
        }
        log::info!("Loaded {} ramp(s)", self.ramps.len());
    }

    /// Ramp at the current selection.
    #[must_use]
    pub fn current(&self) -> &Ramp {
        &self.ramps[self.selected]
    }

    /// Advance selection, wrapping N−1 → 0.
    pub fn next(&mut self) {
        self.selected = if self.selected + 1 == self.ramps.len() {
            0
        } else {
            self.selected + 1
        };
    }

    /// Step selection back, wrapping 0 → N−1.
    pub fn previous(&mut self) {
        self.selected = if self.selected == 0 {
            self.ramps.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Number of ramps, default included. Always ≥ 1.
    #[must_use]
    pub fn count(&self) -> usize {
        self.ramps.len()
    }

    /// Index of the current selection, for the status display.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn set_from_lines(lines: &str) -> RampSet {
        let mut set = RampSet {
            ramps: vec![Ramp::default()],
            selected: 0,
        };
        set.read_table(BufReader::new(lines.as_bytes()));
        set
    }

    #[test]
    fn default_ramp_is_entry_zero() {
        let set = set_from_lines(" #\n.oO\n");
        assert_eq!(set.count(), 3);
        assert_eq!(set.current(), &Ramp::default());
    }

    #[test]
    fn table_cap_honored() {
        // 20 file lines → 1 default + 7 from the file.
        let lines: String = (0..20).map(|i| format!("ramp{i}\n")).collect();
        let set = set_from_lines(&lines);
        assert_eq!(set.count(), MAX_RAMPS);
    }

    #[test]
    fn empty_lines_skipped_not_counted() {
        let set = set_from_lines(" #\n\n   \n.oO\n");
        assert_eq!(set.count(), 3);
    }

    #[test]
    fn trailing_whitespace_stripped_leading_kept() {
        let ramp = Ramp::parse(" .:#\n").unwrap();
        assert_eq!(ramp.len(), 4);
        assert_eq!(ramp.glyph(0), ' ');
        assert_eq!(ramp.glyph(3), '#');
    }

    #[test]
    fn wraparound_round_trips() {
        let mut set = set_from_lines(" #\n.oO\nxyz\n");
        let start = set.selected_index();
        for _ in 0..set.count() {
            set.next();
        }
        assert_eq!(set.selected_index(), start);
        for _ in 0..set.count() {
            set.previous();
        }
        assert_eq!(set.selected_index(), start);
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut set = set_from_lines(" #\n");
        assert_eq!(set.selected_index(), 0);
        set.previous();
        assert_eq!(set.selected_index(), set.count() - 1);
    }

    #[test]
    fn invalid_line_stops_parsing_keeps_earlier_ramps() {
        // Second line is not UTF-8; parsing stops there, the default and
        // the first file ramp survive.
        let bytes: &[u8] = b" #\n\xFF\xFE\n.oO\n";
        let mut set = RampSet {
            ramps: vec![Ramp::default()],
            selected: 0,
        };
        set.read_table(BufReader::new(bytes));
        assert_eq!(set.count(), 2);
        set.next();
        assert_eq!(set.current(), &Ramp::parse(" #").unwrap());
    }

    #[test]
    fn explicit_missing_path_degrades_to_default_only() {
        let set = RampSet::load(Some(Path::new("/nonexistent/ramps.tbl")));
        assert_eq!(set.count(), 1);
        assert_eq!(set.current(), &Ramp::default());
    }

    #[test]
    fn load_reads_file_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, " .#").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "01").unwrap();
        file.flush().unwrap();

        let mut set = RampSet::load(Some(file.path()));
        assert_eq!(set.count(), 3);
        set.next();
        assert_eq!(set.current(), &Ramp::parse(" .#").unwrap());
        set.next();
        assert_eq!(set.current(), &Ramp::parse("01").unwrap());
    }
}
