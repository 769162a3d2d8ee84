//! Read-only table rendering of a session's registry and scopes.
//!
//! Everything here goes through the public query surface; rendering never
//! mutates the tables it displays.

use std::io::{self, Write};

use owo_colors::{OwoColorize, Style};

use crate::sema::{Scope, Session, SymbolCategory, TypeRegistry};

pub struct TableRenderer {
    color: bool,
}

impl TableRenderer {
    pub fn new(color: bool) -> Self {
        TableRenderer { color }
    }

    /// Renders the type table, the global scope, each struct's member table
    /// and the active local scope.
    pub fn render(&self, session: &Session, out: &mut dyn Write) -> io::Result<()> {
        self.type_table(session.types(), out)?;

        if let Some(global) = session.scopes().base() {
            self.heading("Global scope", out)?;
            self.global_table(global, session.types(), out)?;

            for (name, symbol) in global.symbols() {
                if symbol.category != SymbolCategory::Struct {
                    continue;
                }
                if let Some(members) = session.types().member_scope_of(symbol.type_id) {
                    self.heading(&format!("Struct {}", name), out)?;
                    self.member_table(members, session.types(), out)?;
                }
            }
        }

        if session.scopes().len() > 1 {
            if let Some(local) = session.scopes().peek() {
                self.heading("Local scope", out)?;
                self.local_table(local, session.types(), out)?;
            }
        }

        Ok(())
    }

    fn type_table(&self, types: &TypeRegistry, out: &mut dyn Write) -> io::Result<()> {
        self.heading("Type table", out)?;

        let mut rows = Vec::new();
        for (id, ty) in types.iter() {
            let description = if ty.is_struct() {
                struct_description(types, id)
            } else if ty.is_array() {
                let base = ty.base_type.map_or("", |b| types.name_of(b));
                format!("array of {}", base)
            } else {
                String::from("primitive")
            };

            let style = if ty.is_struct() {
                Style::new().blue()
            } else {
                Style::new()
            };
            rows.push((style, vec![
                id.to_string(),
                ty.name.clone(),
                ty.size_bytes.to_string(),
                ty.item_count.to_string(),
                description,
            ]));
        }

        self.table(&["ID", "Type", "Size", "Items", "Description"], &rows, out)
    }

    fn global_table(&self, global: &Scope, types: &TypeRegistry, out: &mut dyn Write) -> io::Result<()> {
        let mut rows = Vec::new();
        for (name, symbol) in global.symbols() {
            let (type_id, return_type) = if symbol.is_function() {
                (String::from("-"), types.name_of(symbol.type_id).to_string())
            } else {
                (symbol.type_id.to_string(), String::from("-"))
            };

            rows.push((category_style(symbol.category), vec![
                name.to_string(),
                type_id,
                return_type,
                symbol.category.to_string(),
                symbol.offset.to_string(),
            ]));
        }

        self.table(&["Name", "Type ID", "Return type", "Category", "Offset"], &rows, out)
    }

    fn member_table(&self, members: &Scope, types: &TypeRegistry, out: &mut dyn Write) -> io::Result<()> {
        let mut rows = Vec::new();
        for (name, symbol) in members.symbols() {
            rows.push((category_style(symbol.category), vec![
                name.to_string(),
                symbol.type_id.to_string(),
                types.name_of(symbol.type_id).to_string(),
                symbol.offset.to_string(),
            ]));
        }

        self.table(&["Name", "Type ID", "Type", "Offset"], &rows, out)
    }

    fn local_table(&self, local: &Scope, types: &TypeRegistry, out: &mut dyn Write) -> io::Result<()> {
        let mut rows = Vec::new();
        for (name, symbol) in local.symbols() {
            if symbol.is_function() {
                continue;
            }
            rows.push((category_style(symbol.category), vec![
                name.to_string(),
                symbol.type_id.to_string(),
                types.name_of(symbol.type_id).to_string(),
                symbol.offset.to_string(),
                symbol.category.to_string(),
            ]));
        }

        self.table(&["Name", "Type ID", "Type", "Offset", "Category"], &rows, out)
    }

    fn heading(&self, title: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.painted(title, Style::new().cyan().bold()))
    }

    /// Box-drawn table. Column widths come from the raw cell text; styling
    /// is applied only at emit time so it never skews the layout.
    fn table(
        &self,
        headers: &[&str],
        rows: &[(Style, Vec<String>)],
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for (_, row) in rows {
            for (column, cell) in row.iter().enumerate() {
                if cell.len() > widths[column] {
                    widths[column] = cell.len();
                }
            }
        }

        let border = Style::new().bright_black();
        let bar = self.painted("│", border);
        let divider = format!(" {} ", bar);
        self.rule(&widths, '┌', '┬', '┐', out)?;

        let header_cells: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| self.painted(&format!("{:<width$}", h, width = *w), Style::new().bold()))
            .collect();
        writeln!(
            out,
            "{bar} {} {bar}",
            header_cells.join(divider.as_str()),
            bar = bar
        )?;

        self.rule(&widths, '├', '┼', '┤', out)?;

        for (style, row) in rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| self.painted(&format!("{:<width$}", cell, width = *w), *style))
                .collect();
            writeln!(
                out,
                "{bar} {} {bar}",
                cells.join(divider.as_str()),
                bar = bar
            )?;
        }

        self.rule(&widths, '└', '┴', '┘', out)
    }

    fn rule(
        &self,
        widths: &[usize],
        left: char,
        mid: char,
        right: char,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let mut line = String::new();
        line.push(left);
        for (index, width) in widths.iter().enumerate() {
            if index > 0 {
                line.push(mid);
            }
            for _ in 0..width + 2 {
                line.push('─');
            }
        }
        line.push(right);
        writeln!(out, "{}", self.painted(&line, Style::new().bright_black()))
    }

    fn painted(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

fn category_style(category: SymbolCategory) -> Style {
    match category {
        SymbolCategory::Function => Style::new().magenta(),
        SymbolCategory::Struct => Style::new().blue(),
        SymbolCategory::Member => Style::new().bright_black(),
        SymbolCategory::Variable => Style::new(),
    }
}

fn struct_description(types: &TypeRegistry, id: crate::sema::TypeId) -> String {
    let Some(members) = types.member_scope_of(id) else {
        return String::from("struct");
    };
    if members.is_empty() {
        return String::from("struct");
    }

    let fields: Vec<String> = members
        .symbols()
        .map(|(name, symbol)| {
            let type_name = types.name_of(symbol.type_id);
            if type_name.is_empty() {
                format!("{} {}", symbol.type_id, name)
            } else {
                format!("{} {}", type_name, name)
            }
        })
        .collect();
    format!("struct {{ {} }}", fields.join("; "))
}
