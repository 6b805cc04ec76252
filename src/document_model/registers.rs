#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterType {
    Character, // Text within a line
    Line,      // Complete lines
}

/// The single unnamed register: last yanked or deleted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    content: String,
    register_type: RegisterType,
}

impl Register {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            register_type: RegisterType::Character,
        }
    }

    /// Overwrite the register unconditionally.
    pub fn store(&mut self, content: String, register_type: RegisterType) {
        self.content = content;
        self.register_type = register_type;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn register_type(&self) -> RegisterType {
        self.register_type
    }

    pub fn is_linewise(&self) -> bool {
        self.register_type == RegisterType::Line
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.register_type == RegisterType::Character
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}
