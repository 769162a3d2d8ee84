//! Line-oriented declaration scanner.
//!
//! Not a tokenizer: each trimmed line is matched against the handful of
//! declaration shapes the toy language has (struct blocks, function headers
//! with local variables, global variables and arrays) and turned into
//! declaration events on the [`Session`]. Anything malformed or
//! unrecognized is skipped; the tables below this layer assume well-formed
//! descriptors and the scanner is deliberately permissive.

use log::debug;

use crate::sema::{Scope, Session};

enum Block {
    None,
    /// Inside `struct Name { ... }`, collecting `(field, type-name)` pairs.
    Struct {
        name: String,
        fields: Vec<(String, String)>,
    },
    /// Inside a function body, collecting locals into a pending scope.
    Function {
        locals: Scope,
    },
}

pub struct DeclScanner<'a> {
    session: &'a mut Session,
    block: Block,
}

impl<'a> DeclScanner<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        DeclScanner {
            session,
            block: Block::None,
        }
    }

    /// Feeds every line of `source` through the declaration matcher. Each
    /// function body becomes a local scope pushed onto the session's stack
    /// when its closing brace is seen.
    pub fn scan(&mut self, source: &str) {
        for raw in source.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            self.scan_line(line);
        }
    }

    fn scan_line(&mut self, line: &str) {
        match std::mem::replace(&mut self.block, Block::None) {
            Block::Struct { name, fields } => self.struct_line(line, name, fields),
            Block::Function { locals } => self.function_line(line, locals),
            Block::None => {
                if line.starts_with("struct") {
                    self.struct_header(line);
                } else if line.contains('(') && !line.contains(';') {
                    self.function_header(line);
                } else if line.contains(';') {
                    self.global_declaration(line);
                } else {
                    debug!("scanner: skipping line '{}'", line);
                }
            }
        }
    }

    fn struct_header(&mut self, line: &str) {
        let mut words = line.split_whitespace();
        words.next(); // "struct"
        match words.next() {
            Some(name) => {
                self.block = Block::Struct {
                    name: name.trim_end_matches('{').to_string(),
                    fields: Vec::new(),
                };
            }
            None => debug!("scanner: struct header without a name: '{}'", line),
        }
    }

    fn struct_line(&mut self, line: &str, name: String, mut fields: Vec<(String, String)>) {
        if line.contains('}') {
            self.session.declare_struct(&name, &fields);
            return;
        }

        if line.contains(';') {
            let mut parts = line.split(|c: char| c.is_whitespace() || c == ';').filter(|p| !p.is_empty());
            if let (Some(field_type), Some(field_name)) = (parts.next(), parts.next()) {
                fields.push((field_name.to_string(), field_type.to_string()));
            } else {
                debug!("scanner: malformed struct field '{}'", line);
            }
        }
        self.block = Block::Struct { name, fields };
    }

    fn function_header(&mut self, line: &str) {
        let mut head = line.split(|c: char| c.is_whitespace() || c == '(').filter(|p| !p.is_empty());
        let (return_type, name) = match (head.next(), head.next()) {
            (Some(ret), Some(name)) => (ret, name),
            _ => {
                debug!("scanner: malformed function header '{}'", line);
                return;
            }
        };

        let mut param_types = Vec::new();
        if let (Some(open), Some(close)) = (line.find('('), line.find(')')) {
            let params = &line[open + 1..close];
            if !params.trim().is_empty() {
                for param in params.split(',') {
                    if let Some(type_name) = param.split_whitespace().next() {
                        param_types.push(type_name.to_string());
                    }
                }
            }
        }

        self.session.declare_function(name, return_type, &param_types);
        self.block = Block::Function {
            locals: self.session.new_local_scope(),
        };
    }

    fn function_line(&mut self, line: &str, mut locals: Scope) {
        if line.contains('}') {
            self.session.push_local_scope(locals);
            return;
        }

        if line.contains(';') && !line.starts_with("return") {
            self.declaration(line, &mut locals);
        }
        self.block = Block::Function { locals };
    }

    fn global_declaration(&mut self, line: &str) {
        let mut parts = line.split_whitespace();
        let (type_text, name) = match (parts.next(), parts.next()) {
            (Some(ty), Some(name)) => (ty, name.trim_end_matches(';')),
            _ => {
                debug!("scanner: malformed declaration '{}'", line);
                return;
            }
        };

        match parse_array_type(type_text) {
            Some((base, dims)) => self.session.declare_global_array(name, base, &dims),
            None if type_text.contains('[') => {
                debug!("scanner: unparsable array type '{}'", type_text)
            }
            None => self.session.declare_global_variable(name, type_text),
        }
    }

    fn declaration(&mut self, line: &str, locals: &mut Scope) {
        let mut parts = line.split_whitespace();
        let (type_text, name) = match (parts.next(), parts.next()) {
            (Some(ty), Some(name)) => (ty, name.trim_end_matches(';')),
            _ => {
                debug!("scanner: malformed local declaration '{}'", line);
                return;
            }
        };

        match parse_array_type(type_text) {
            Some((base, dims)) => self.session.declare_local_array(locals, name, base, &dims),
            None if type_text.contains('[') => {
                debug!("scanner: unparsable array type '{}'", type_text)
            }
            None => self.session.declare_local_variable(locals, name, type_text),
        }
    }
}

/// Splits `int[3][4]` into `("int", [3, 4])`. Returns `None` when the text
/// carries no brackets or a dimension does not parse as an integer.
fn parse_array_type(type_text: &str) -> Option<(&str, Vec<i32>)> {
    let open = type_text.find('[')?;
    let base = &type_text[..open];

    let mut dims = Vec::new();
    let mut rest = &type_text[open..];
    while let Some(start) = rest.find('[') {
        let end = rest.find(']')?;
        let dim: i32 = rest[start + 1..end].trim().parse().ok()?;
        dims.push(dim);
        rest = &rest[end + 1..];
    }
    Some((base, dims))
}
