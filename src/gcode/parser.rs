use super::types::{Axis, Command};

/// A letter and the numeric literal written right after it, e.g. `X-10.5`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpCode<'a> {
    pub letter: char,
    pub literal: &'a str,
    pub value: f64,
}

impl OpCode<'_> {
    /// The code as it appeared on the line
    pub fn text(&self) -> String {
        format!("{}{}", self.letter, self.literal)
    }

    /// True for integral codes such as `G1` or `M84`. `G01` counts as `G1`.
    pub fn is(&self, letter: char, number: u32) -> bool {
        self.letter == letter
            && !self.literal.contains(&['-', '.'][..])
            && self.literal.parse::<u32>().ok() == Some(number)
    }

    /// Classify the code; `G92` still needs the rest of the line to decide.
    pub fn command(&self) -> Command {
        match self.letter {
            'F' => Command::Feed(self.value),
            'X' => Command::Axis(Axis::X, self.value),
            'Y' => Command::Axis(Axis::Y, self.value),
            'Z' => Command::Axis(Axis::Z, self.value),
            'E' | 'S' | 'T' => Command::Passive,
            'G' if self.is('G', 0) || self.is('G', 1) => Command::Move,
            'G' if self.is('G', 28) => Command::Home,
            'G' if self.is('G', 92) => Command::SetPosition,
            'G' if PASSIVE_G.iter().any(|&n| self.is('G', n)) => Command::Passive,
            'M' if PASSIVE_M.iter().any(|&n| self.is('M', n)) => Command::Passive,
            _ => Command::Unknown,
        }
    }
}

/// Unit and positioning modes
const PASSIVE_G: [u32; 4] = [20, 21, 90, 91];
/// Extruder mode, motors off, temperatures, fan
const PASSIVE_M: [u32; 10] = [82, 83, 84, 104, 105, 106, 107, 109, 140, 190];

/// True when the line is a comment (`;` as first non-blank character)
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(';')
}

/// Op-codes of one line, left to right. Comment lines and anything after an
/// inline `;` produce nothing.
pub fn extract_codes(line: &str) -> OpCodes<'_> {
    let code = match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    };
    OpCodes { src: code, pos: 0 }
}

/// Lazy scanner over a line; clone it to restart from the same point
#[derive(Debug, Clone)]
pub struct OpCodes<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for OpCodes<'a> {
    type Item = OpCode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            self.pos += 1;
            if !b.is_ascii_uppercase() {
                continue;
            }
            if let Some(end) = literal_end(bytes, self.pos) {
                let literal = &self.src[self.pos..end];
                self.pos = end;
                if let Ok(value) = literal.parse::<f64>() {
                    return Some(OpCode { letter: b as char, literal, value });
                }
            }
        }
        None
    }
}

/// End of `-?digits(.digits*)?` starting at `start`, if at least one digit
fn literal_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    let digits = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits {
        return None;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    Some(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<String> {
        extract_codes(line).map(|c| c.text()).collect()
    }

    #[test]
    fn extracts_codes_in_order() {
        assert_eq!(texts("G1 X10 Y20 F1000"), vec!["G1", "X10", "Y20", "F1000"]);
        assert_eq!(texts("G1X10Y20"), vec!["G1", "X10", "Y20"]);
    }

    #[test]
    fn literal_keeps_sign_and_decimal_point() {
        let codes: Vec<_> = extract_codes("G0 X-10.5 Y3. Z0.25").collect();
        assert_eq!(codes[1].literal, "-10.5");
        assert!((codes[1].value + 10.5).abs() < 1e-9);
        assert_eq!(codes[2].literal, "3.");
        assert!((codes[2].value - 3.0).abs() < 1e-9);
        assert_eq!(codes[3].text(), "Z0.25");
    }

    #[test]
    fn letters_without_digits_are_skipped() {
        assert_eq!(texts("M117 HELLO X"), vec!["M117"]);
        assert_eq!(texts("X- Y-5"), vec!["Y-5"]);
        assert_eq!(texts("g1 x10"), Vec::<String>::new());
    }

    #[test]
    fn comments_produce_nothing() {
        assert!(is_comment(";LAYER:0"));
        assert!(is_comment("   ; G1 X10"));
        assert!(!is_comment("G1 X10 ; trailing"));
        assert_eq!(extract_codes(";G1 X10 Y10").count(), 0);
        assert_eq!(texts("G1 X10 ; to X20"), vec!["G1", "X10"]);
        assert_eq!(extract_codes("").count(), 0);
    }

    #[test]
    fn scanner_is_restartable() {
        let codes = extract_codes("G1 X1 Y2");
        let first: Vec<_> = codes.clone().collect();
        let second: Vec<_> = codes.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn classifies_commands() {
        let cmd = |s: &str| extract_codes(s).next().map(|c| c.command());
        assert_eq!(cmd("G0"), Some(Command::Move));
        assert_eq!(cmd("G01"), Some(Command::Move));
        assert_eq!(cmd("G10"), Some(Command::Unknown));
        assert_eq!(cmd("G28"), Some(Command::Home));
        assert_eq!(cmd("G92"), Some(Command::SetPosition));
        assert_eq!(cmd("G21"), Some(Command::Passive));
        assert_eq!(cmd("M84"), Some(Command::Passive));
        assert_eq!(cmd("M109"), Some(Command::Passive));
        assert_eq!(cmd("T1"), Some(Command::Passive));
        assert_eq!(cmd("F1500"), Some(Command::Feed(1500.0)));
        assert_eq!(cmd("Z0.3"), Some(Command::Axis(Axis::Z, 0.3)));
        assert_eq!(cmd("M117"), Some(Command::Unknown));
        assert_eq!(cmd("N10"), Some(Command::Unknown));
    }
}
