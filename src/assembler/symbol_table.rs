//! Symbol table management for labels

use crate::assembler::Symbol;
use std::collections::HashMap;

/// Symbol table for managing label definitions
///
/// Symbols keep their definition order; lookups go through a name index.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: HashMap<String, usize>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol to the table
    ///
    /// Returns Ok(()) on success, or the existing definition if the name is taken.
    /// Names are case-sensitive.
    pub fn add_symbol(
        &mut self,
        name: String,
        address: u16,
        defined_at: usize,
    ) -> Result<(), Symbol> {
        if let Some(existing) = self.lookup_symbol(&name) {
            return Err(existing.clone());
        }

        self.by_name.insert(name.clone(), self.symbols.len());
        self.symbols.push(Symbol {
            name,
            address,
            defined_at,
        });

        Ok(())
    }

    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.by_name.get(name).map(|&i| &self.symbols[i])
    }

    /// Get all symbols in definition order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_add_lookup() {
        let mut table = SymbolTable::new();

        assert!(table.add_symbol("START".to_string(), 0x0000, 1).is_ok());
        assert!(table.add_symbol("LOOP".to_string(), 0x0004, 5).is_ok());

        let start = table.lookup_symbol("START").unwrap();
        assert_eq!(start.address, 0x0000);
        assert_eq!(start.defined_at, 1);

        assert_eq!(table.lookup_symbol("LOOP").unwrap().address, 0x0004);
        assert!(table.lookup_symbol("loop").is_none());
        assert!(table.lookup_symbol("UNDEFINED").is_none());
    }

    #[test]
    fn test_symbol_table_duplicate() {
        let mut table = SymbolTable::new();

        assert!(table.add_symbol("START".to_string(), 0x0000, 1).is_ok());
        let existing = table.add_symbol("START".to_string(), 0x0010, 10).unwrap_err();
        assert_eq!(existing.defined_at, 1);

        // First definition wins
        assert_eq!(table.lookup_symbol("START").unwrap().address, 0x0000);
        assert_eq!(table.symbols().len(), 1);
    }

    #[test]
    fn test_definition_order_is_kept() {
        let mut table = SymbolTable::new();
        for (i, name) in ["c", "a", "b"].iter().enumerate() {
            table.add_symbol(name.to_string(), i as u16, i + 1).unwrap();
        }

        let names: Vec<_> = table.into_symbols().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
