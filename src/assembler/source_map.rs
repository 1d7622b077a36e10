//! Source map for bidirectional mapping between binary and source locations

/// Bidirectional mapping between binary and source locations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMap {
    /// Forward map: instruction address → source location
    /// Sorted by address for binary search
    address_to_source: Vec<(u16, SourceLocation)>,

    /// Reverse map: source line → instruction address range
    /// Sorted by line number for binary search
    source_to_address: Vec<(usize, AddressRange)>,
}

/// A location in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column where instruction starts (0-indexed)
    pub column: usize,

    /// Length of instruction in source characters
    pub length: usize,
}

/// A range of instruction addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    /// Starting address (inclusive)
    pub start: u16,

    /// Ending address (exclusive, may be 0x10000 for the last byte)
    pub end: u32,
}

impl SourceMap {
    /// Create a new empty source map
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an instruction of `size` bytes at `address` assembled from `location`.
    pub fn add_mapping(&mut self, address: u16, size: u8, location: SourceLocation) {
        self.address_to_source.push((address, location));
        self.source_to_address.push((
            location.line,
            AddressRange {
                start: address,
                end: address as u32 + size as u32,
            },
        ));
    }

    /// Get source location for the instruction starting at `address`
    pub fn get_source_location(&self, address: u16) -> Option<SourceLocation> {
        self.address_to_source
            .binary_search_by_key(&address, |(addr, _)| *addr)
            .ok()
            .map(|idx| self.address_to_source[idx].1)
    }

    /// Get address range for a given source line
    pub fn get_address_range(&self, line: usize) -> Option<AddressRange> {
        self.source_to_address
            .binary_search_by_key(&line, |(l, _)| *l)
            .ok()
            .map(|idx| self.source_to_address[idx].1)
    }

    /// Number of mapped instructions.
    pub fn len(&self) -> usize {
        self.address_to_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address_to_source.is_empty()
    }

    /// Finalize the source map (sort for binary search)
    pub fn finalize(&mut self) {
        self.address_to_source.sort_by_key(|(addr, _)| *addr);
        self.source_to_address.sort_by_key(|(line, _)| *line);
    }
}
