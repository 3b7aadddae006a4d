//! Small multiples: partition rows by a key, then tile the rendered blocks.

use std::collections::HashMap;

use tracing::trace;

use crate::{
    core::{
        constants::BLOCK_GAP,
        value::{Record, Value},
    },
    render::frame::Block,
};

/// Rows sharing one grouping value.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: Value,
    /// Indices into the original record slice, in input order.
    pub rows: Vec<usize>,
}

/// Identity of a grouping value.  `Debug` keeps `1` and `"1"` apart and
/// never merges numbers that merely print the same.
fn identity(v: &Value) -> String {
    format!("{v:?}")
}

/// Partition `records` by `field`, groups in first-seen order.
///
/// Order lives in the returned `Vec`; the map only finds a group's slot.
#[must_use]
pub fn group_by(records: &[Record], field: &str) -> Vec<Group> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for (row, r) in records.iter().enumerate() {
        let key = r.get(field).cloned().unwrap_or(Value::Null);
        let slot = *slots.entry(identity(&key)).or_insert_with(|| {
            groups.push(Group {
                key,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(row);
    }
    trace!(field, groups = groups.len(), "partitioned small multiples");
    groups
}

/// Lay `blocks` out `per_row` at a time, side by side with a fixed gap.
///
/// Every block is padded to the widest one so block columns line up across
/// wrapped rows; rows of blocks are separated by one blank line.
#[must_use]
pub fn tile_blocks(blocks: &[Block], per_row: usize) -> Vec<String> {
    let gap = " ".repeat(BLOCK_GAP);
    let width = blocks.iter().map(Block::width).max().unwrap_or(0);
    let mut out = Vec::new();
    for (i, row) in blocks.chunks(per_row.max(1)).enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        let height = row.iter().map(Block::height).max().unwrap_or(0);
        for line in 0..height {
            let joined = row
                .iter()
                .map(|b| b.padded_line(line, width))
                .collect::<Vec<_>>()
                .join(&gap);
            out.push(joined.trim_end().to_owned());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_first_seen_order() {
        let rows: Vec<Record> = ["b", "a", "b", "c", "a"]
            .iter()
            .map(|g| Record::new().with("g", *g))
            .collect();
        let groups = group_by(&rows, "g");
        let keys: Vec<&Value> = groups.iter().map(|g| &g.key).collect();
        assert_eq!(keys, [&Value::from("b"), &Value::from("a"), &Value::from("c")]);
        assert_eq!(groups[0].rows, [0, 2]);
        assert_eq!(groups[1].rows, [1, 4]);
    }

    #[test]
    fn number_and_string_keys_stay_apart() {
        let rows = vec![Record::new().with("g", 1), Record::new().with("g", "1")];
        assert_eq!(group_by(&rows, "g").len(), 2);
    }

    #[test]
    fn tiles_wrap_after_per_row() {
        let block = |s: &str| Block::new(vec![s.to_owned(), "xx".to_owned()]);
        let blocks = vec![block("a"), block("b"), block("c")];
        let lines = tile_blocks(&blocks, 2);
        assert_eq!(lines, ["a     b", "xx    xx", "", "c", "xx"]);
    }

    #[test]
    fn wrapped_rows_share_block_columns() {
        let block = |a: &str, b: &str| Block::new(vec![a.to_owned(), b.to_owned()]);
        let blocks = vec![
            block("a", "xxxx"),
            block("b", "y"),
            block("c", "z"),
            block("d", "w"),
        ];
        let lines = tile_blocks(&blocks, 2);
        assert_eq!(lines, ["a       b", "xxxx    y", "", "c       d", "z       w"]);
        assert_eq!(lines[0].find('b'), lines[3].find('d'));
    }
}
