/// Emitter handles all text output operations for stylesheet printing.
pub struct Emitter {
    pub output: String,
    indent_level: usize,
    indent_str: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "  ".to_string(),
        }
    }

    pub fn with_indent_str(mut self, indent_str: impl Into<String>) -> Self {
        self.indent_str = indent_str.into();
        self
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub fn writeln(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_str);
        }
    }

    pub fn write_indented(&mut self, s: &str) {
        self.write_indent();
        self.writeln(s);
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
