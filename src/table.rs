//! Table construction and structural mutation.
//!
//! A table is a 2-D grid of cells whose positions are implied by tree
//! position. Merged cells carry `rowspan`/`colspan` and logically occupy
//! multiple grid positions; every operation here resolves positions through
//! an explicit occupancy grid so spanned positions are never edited or
//! deleted independently.

use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::error::{EditResult, EditorError};
use crate::node::{Document, Element, Node};

/// Marker class every editable table carries.
pub const TABLE_MARKER_CLASS: &str = "editable-table";
/// Attribute tagging a cell as editable in place.
pub const CELL_EDITABLE_ATTR: &str = "data-editable";
/// Attribute the host binds hover-highlight behavior to.
pub const CELL_HOVER_ATTR: &str = "data-hover-highlight";

/// Logical grid coordinates of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Check whether an element is a table.
pub fn is_table(elem: &Element) -> bool {
    elem.tag == "table"
}

// =============================================================================
// Construction
// =============================================================================

/// Build a rows x cols table: row 0 holds header cells, the rest data
/// cells, each pre-filled with placeholder text and editable in place.
pub fn build_table(rows: usize, cols: usize) -> EditResult<Element> {
    if rows == 0 || cols == 0 {
        return Err(EditorError::InvalidDimensions { rows, cols });
    }
    // Rows go inside an explicit tbody so the rendered markup survives a
    // parse round trip unchanged (the HTML parser inserts one anyway)
    let mut table = Element::new("table").with_class(TABLE_MARKER_CLASS);
    let mut tbody = Element::new("tbody");
    for r in 0..rows {
        let mut tr = Element::new("tr");
        for c in 0..cols {
            tr.push_elem(build_cell(r == 0, &placeholder(r == 0, c)));
        }
        tbody.push_elem(tr);
    }
    table.push_elem(tbody);
    Ok(table)
}

fn placeholder(header: bool, col: usize) -> String {
    if header {
        format!("Header {}", col + 1)
    } else {
        format!("Content {}", col + 1)
    }
}

fn build_cell(header: bool, label: &str) -> Element {
    let mut cell = Element::new(if header { "th" } else { "td" });
    cell.set_attr("contenteditable", "true");
    cell.set_attr(CELL_EDITABLE_ATTR, "true");
    cell.set_attr(CELL_HOVER_ATTR, "true");
    cell.set_text(label);
    cell
}

// =============================================================================
// Occupancy grid
//
// The tree stores spans implicitly; the grid makes them explicit. Rows may
// sit directly under the table or inside thead/tbody/tfoot sections, so a
// row is located by a 1- or 2-component path relative to the table.
// =============================================================================

type RowLoc = SmallVec<[usize; 2]>;

#[derive(Debug, Clone, Copy)]
struct GridCell {
    /// Logical origin position
    row: usize,
    col: usize,
    rowspan: usize,
    colspan: usize,
    /// Index into the row-location list
    loc: usize,
    /// Child index within the tr
    cell: usize,
}

struct Grid {
    cells: Vec<GridCell>,
    occupancy: Vec<Vec<Option<usize>>>,
}

impl Grid {
    fn width(&self) -> usize {
        self.occupancy.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn origin_at(&self, addr: CellAddress) -> Option<GridCell> {
        let idx = (*self.occupancy.get(addr.row)?.get(addr.col)?)?;
        self.cells.get(idx).copied()
    }
}

fn row_locs(table: &Element) -> Vec<RowLoc> {
    let mut locs = Vec::new();
    for (i, child) in table.children.iter().enumerate() {
        let Some(elem) = child.as_element() else {
            continue;
        };
        if elem.tag == "tr" {
            locs.push(smallvec![i]);
        } else if matches!(&*elem.tag, "thead" | "tbody" | "tfoot") {
            for (j, sub) in elem.children.iter().enumerate() {
                if sub.as_element().is_some_and(|e| e.tag == "tr") {
                    locs.push(smallvec![i, j]);
                }
            }
        }
    }
    locs
}

fn row_mut<'a>(table: &'a mut Element, loc: &RowLoc) -> Option<&'a mut Element> {
    match loc.as_slice() {
        [i] => table.children.get_mut(*i)?.as_element_mut(),
        [i, j] => table
            .children
            .get_mut(*i)?
            .as_element_mut()?
            .children
            .get_mut(*j)?
            .as_element_mut(),
        _ => None,
    }
}

fn row_ref<'a>(table: &'a Element, loc: &RowLoc) -> Option<&'a Element> {
    match loc.as_slice() {
        [i] => table.children.get(*i)?.as_element(),
        [i, j] => table
            .children
            .get(*i)?
            .as_element()?
            .children
            .get(*j)?
            .as_element(),
        _ => None,
    }
}

fn cell_elem_mut<'a>(
    table: &'a mut Element,
    loc: &RowLoc,
    cell_idx: usize,
) -> Option<&'a mut Element> {
    row_mut(table, loc)?.children.get_mut(cell_idx)?.as_element_mut()
}

fn span_attr(cell: &Element, name: &str) -> usize {
    cell.get_attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v >= 1)
        .unwrap_or(1)
}

fn set_span_attr(cell: &mut Element, name: &str, value: usize) {
    if value <= 1 {
        cell.remove_attr(name);
    } else {
        cell.set_attr(name, value.to_string());
    }
}

fn build_grid(table: &Element) -> Grid {
    let locs = row_locs(table);
    let mut cells = Vec::new();
    let mut occ: Vec<Vec<Option<usize>>> = vec![Vec::new(); locs.len()];

    for (r, loc) in locs.iter().enumerate() {
        let Some(tr) = row_ref(table, loc) else {
            continue;
        };
        let mut c = 0;
        for (ci, child) in tr.children.iter().enumerate() {
            let Some(cell) = child.as_element() else {
                continue;
            };
            if cell.tag != "td" && cell.tag != "th" {
                continue;
            }
            // Skip positions already claimed by spans from earlier rows
            while occ[r].len() > c && occ[r][c].is_some() {
                c += 1;
            }
            let rowspan = span_attr(cell, "rowspan");
            let colspan = span_attr(cell, "colspan");
            let idx = cells.len();
            cells.push(GridCell {
                row: r,
                col: c,
                rowspan,
                colspan,
                loc: r,
                cell: ci,
            });
            for dr in 0..rowspan {
                let rr = r + dr;
                if rr >= locs.len() {
                    break;
                }
                while occ[rr].len() < c + colspan {
                    occ[rr].push(None);
                }
                for dc in 0..colspan {
                    occ[rr][c + dc] = Some(idx);
                }
            }
            c += colspan;
        }
    }

    Grid {
        cells,
        occupancy: occ,
    }
}

/// Resolve a cell's path relative to its table into a grid address.
///
/// The relative path is `[tr, cell]` for direct rows or
/// `[section, tr, cell]` for rows inside thead/tbody/tfoot; longer paths
/// (positions inside cell content) resolve to the containing cell.
pub fn address_of(table: &Element, cell_rel: &[usize]) -> Option<CellAddress> {
    let locs = row_locs(table);
    let grid = build_grid(table);
    for cell in &grid.cells {
        let loc = &locs[cell.loc];
        let hit = match loc.as_slice() {
            [i] => cell_rel.len() >= 2 && cell_rel[0] == *i && cell_rel[1] == cell.cell,
            [i, j] => {
                cell_rel.len() >= 3
                    && cell_rel[0] == *i
                    && cell_rel[1] == *j
                    && cell_rel[2] == cell.cell
            }
            _ => false,
        };
        if hit {
            return Some(CellAddress::new(cell.row, cell.col));
        }
    }
    None
}

// =============================================================================
// Row and column operations
// =============================================================================

/// Append a row with the table's current column count, data-styled cells,
/// placeholder text. No-op on a rowless table.
pub fn add_row(table: &mut Element) -> bool {
    if !is_table(table) {
        return false;
    }
    let cols = build_grid(table).width();
    if cols == 0 {
        return false;
    }
    let mut tr = Element::new("tr");
    for c in 0..cols {
        tr.push_elem(build_cell(false, &placeholder(false, c)));
    }

    // Keep the new row next to the last existing one (inside its section)
    let locs = row_locs(table);
    match locs.last().map(|l| l.as_slice()) {
        Some([i, _]) => {
            let section = table.children.get_mut(*i).and_then(|n| n.as_element_mut());
            match section {
                Some(section) => section.push_elem(tr),
                None => table.push_elem(tr),
            }
        }
        _ => table.push_elem(tr),
    }
    true
}

/// Append one cell to every row: header-styled in row 0, data-styled
/// elsewhere, placeholder text reflecting the new column position.
pub fn add_column(table: &mut Element) -> bool {
    if !is_table(table) {
        return false;
    }
    let width = build_grid(table).width();
    let locs = row_locs(table);
    if locs.is_empty() {
        return false;
    }
    for (r, loc) in locs.iter().enumerate() {
        if let Some(tr) = row_mut(table, loc) {
            tr.push_elem(build_cell(r == 0, &placeholder(r == 0, width)));
        }
    }
    true
}

/// Remove an entire logical row. Cells spanning into it from earlier rows
/// have their rowspan shrunk, and cells originating in it that span
/// further down move into the following row one row shorter, so no grid
/// position is lost.
pub fn delete_row(table: &mut Element, row: usize) -> bool {
    if !is_table(table) {
        return false;
    }
    let grid = build_grid(table);
    let locs = row_locs(table);
    if row >= locs.len() {
        return false;
    }

    for cell in &grid.cells {
        if cell.row < row && cell.row + cell.rowspan > row
            && let Some(elem) = cell_elem_mut(table, &locs[cell.loc], cell.cell)
        {
            set_span_attr(elem, "rowspan", cell.rowspan - 1);
        }
    }

    if row + 1 < locs.len() {
        let mut reseats: Vec<(usize, Element)> = Vec::new();
        for cell in &grid.cells {
            if cell.row == row
                && cell.rowspan > 1
                && let Some(elem) = cell_elem_mut(table, &locs[cell.loc], cell.cell)
            {
                let mut moved = elem.clone();
                set_span_attr(&mut moved, "rowspan", cell.rowspan - 1);
                reseats.push((cell.col, moved));
            }
        }
        reseats.sort_by_key(|(col, _)| *col);
        let mut inserted = 0;
        for (col, moved) in reseats {
            // Land before the first next-row cell at or past this column
            let at = grid
                .cells
                .iter()
                .filter(|c| c.row == row + 1 && c.col >= col)
                .map(|c| c.cell)
                .min();
            if let Some(tr) = row_mut(table, &locs[row + 1]) {
                let at = at.map(|i| i + inserted).unwrap_or(tr.children.len());
                tr.insert_child(at, Node::Element(Box::new(moved)));
                inserted += 1;
            }
        }
    }

    match locs[row].as_slice() {
        [i] => table.remove_child(*i).is_some(),
        [i, j] => table
            .children
            .get_mut(*i)
            .and_then(|n| n.as_element_mut())
            .and_then(|s| s.remove_child(*j))
            .is_some(),
        _ => false,
    }
}

/// Remove the cell at a column index from every row. Cells spanning the
/// column shrink their colspan instead of disappearing.
pub fn delete_column(table: &mut Element, col: usize) -> bool {
    if !is_table(table) {
        return false;
    }
    let grid = build_grid(table);
    if col >= grid.width() {
        return false;
    }
    let locs = row_locs(table);

    let mut removals: Vec<(usize, usize)> = Vec::new();
    for cell in &grid.cells {
        if cell.col > col || col >= cell.col + cell.colspan {
            continue;
        }
        if cell.colspan > 1 {
            if let Some(elem) = cell_elem_mut(table, &locs[cell.loc], cell.cell) {
                set_span_attr(elem, "colspan", cell.colspan - 1);
            }
        } else {
            removals.push((cell.loc, cell.cell));
        }
    }
    // Remove highest child indices first so earlier removals don't shift
    removals.sort_by(|a, b| b.cmp(a));
    for (loc, ci) in removals {
        if let Some(tr) = row_mut(table, &locs[loc]) {
            tr.remove_child(ci);
        }
    }
    true
}

// =============================================================================
// Merge and split
// =============================================================================

/// Merge the rectangular region between two cells. The start cell takes
/// the combined span and placeholder merged content; every other cell in
/// the region is removed. No-op when start and end resolve to the same
/// cell or either address is invalid.
pub fn merge_cells(table: &mut Element, start: CellAddress, end: CellAddress) -> bool {
    if !is_table(table) || start == end {
        return false;
    }
    let grid = build_grid(table);
    let (Some(s), Some(e)) = (grid.origin_at(start), grid.origin_at(end)) else {
        return false;
    };
    if (s.loc, s.cell) == (e.loc, e.cell) {
        return false;
    }

    let r0 = s.row.min(e.row);
    let r1 = s.row.max(e.row);
    let c0 = s.col.min(e.col);
    let c1 = s.col.max(e.col);
    let locs = row_locs(table);

    let Some(anchor) = cell_elem_mut(table, &locs[s.loc], s.cell) else {
        return false;
    };
    set_span_attr(anchor, "rowspan", r1 - r0 + 1);
    set_span_attr(anchor, "colspan", c1 - c0 + 1);
    anchor.set_text("Merged Content");

    let mut removals: Vec<(usize, usize)> = grid
        .cells
        .iter()
        .filter(|c| c.row >= r0 && c.row <= r1 && c.col >= c0 && c.col <= c1)
        .map(|c| (c.loc, c.cell))
        .filter(|&p| p != (s.loc, s.cell))
        .collect();
    removals.sort_by(|a, b| b.cmp(a));
    for (loc, ci) in removals {
        if let Some(tr) = row_mut(table, &locs[loc]) {
            tr.remove_child(ci);
        }
    }
    true
}

/// Split a merged cell back into 1x1 cells covering its former region.
/// Same-row cells are inserted immediately after the original; cells for
/// subsequent rows are inserted at the column offset the region vacated.
/// No-op when the addressed cell has no span.
pub fn split_cell(table: &mut Element, addr: CellAddress) -> bool {
    if !is_table(table) {
        return false;
    }
    let grid = build_grid(table);
    let Some(origin) = grid.origin_at(addr) else {
        return false;
    };
    if origin.rowspan <= 1 && origin.colspan <= 1 {
        return false;
    }
    let locs = row_locs(table);

    match cell_elem_mut(table, &locs[origin.loc], origin.cell) {
        Some(elem) => {
            set_span_attr(elem, "rowspan", 1);
            set_span_attr(elem, "colspan", 1);
        }
        None => return false,
    }

    if origin.colspan > 1
        && let Some(tr) = row_mut(table, &locs[origin.loc])
    {
        for k in 1..origin.colspan {
            let label = format!("Cell {}-{}", origin.row + 1, origin.col + k + 1);
            tr.insert_child(
                origin.cell + k,
                Node::Element(Box::new(build_cell(origin.row == 0, &label))),
            );
        }
    }

    for dr in 1..origin.rowspan {
        let rr = origin.row + dr;
        if rr >= locs.len() {
            break;
        }
        // Insert before the first cell whose column is at or past the
        // vacated offset, else append
        let before = grid
            .cells
            .iter()
            .filter(|c| c.loc == rr && c.col >= origin.col)
            .map(|c| c.cell)
            .min();
        if let Some(tr) = row_mut(table, &locs[rr]) {
            let at = before.unwrap_or(tr.children.len());
            for k in 0..origin.colspan {
                let label = format!("Cell {}-{}", rr + 1, origin.col + k + 1);
                tr.insert_child(at + k, Node::Element(Box::new(build_cell(false, &label))));
            }
        }
    }
    true
}

// =============================================================================
// Enhancement pass
// =============================================================================

/// Re-enhance every table in the tree after an external content
/// replacement: marker class, editable cell tagging, hover marker.
/// Idempotent - re-running on enhanced markup changes nothing.
pub fn enhance_tables(doc: &mut Document) -> usize {
    let mut touched = 0;
    doc.for_each_element_mut(|elem| {
        if elem.tag == "table" {
            elem.add_class(TABLE_MARKER_CLASS);
            touched += 1;
        } else if elem.tag == "td" || elem.tag == "th" {
            elem.set_attr("contenteditable", "true");
            elem.set_attr(CELL_EDITABLE_ATTR, "true");
            elem.set_attr(CELL_HOVER_ATTR, "true");
        }
    });
    if touched > 0 {
        trace!(tables = touched, "re-enhanced tables");
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Document;
    use crate::render::{render_element_string, render_fragment};

    fn cell_count(table: &Element) -> usize {
        let doc = Document::new(table.clone());
        doc.find_all(|e| e.tag == "td" || e.tag == "th").len()
    }

    #[test]
    fn test_build_table_header_and_data_rows() {
        let table = build_table(2, 2).unwrap();
        assert_eq!(cell_count(&table), 4);

        let tbody = table.first_child().unwrap();
        assert_eq!(tbody.tag, "tbody");
        let rows: Vec<&Element> = tbody.children_elements().collect();
        assert_eq!(rows.len(), 2);
        let headers: Vec<&Element> = rows[0].children_elements().collect();
        assert!(headers.iter().all(|c| c.tag == "th"));
        assert_eq!(headers[0].text_content(), "Header 1");
        let data: Vec<&Element> = rows[1].children_elements().collect();
        assert!(data.iter().all(|c| c.tag == "td"));
        assert_eq!(data[1].text_content(), "Content 2");
        assert!(table.has_class(TABLE_MARKER_CLASS));
    }

    #[test]
    fn test_build_table_rejects_zero() {
        assert!(build_table(0, 3).is_err());
        assert!(build_table(3, 0).is_err());
    }

    #[test]
    fn test_add_row_and_column() {
        let mut table = build_table(2, 2).unwrap();
        assert!(add_row(&mut table));
        assert_eq!(cell_count(&table), 6);

        assert!(add_column(&mut table));
        assert_eq!(cell_count(&table), 9);

        // New column header lands in row 0 as a th
        let tbody = table.first_child().unwrap();
        let rows: Vec<&Element> = tbody.children_elements().collect();
        let last_header = rows[0].children_elements().last().unwrap();
        assert_eq!(last_header.tag, "th");
        assert_eq!(last_header.text_content(), "Header 3");
    }

    #[test]
    fn test_delete_row_and_column() {
        let mut table = build_table(3, 3).unwrap();
        assert!(delete_row(&mut table, 1));
        assert_eq!(cell_count(&table), 6);

        assert!(delete_column(&mut table, 0));
        assert_eq!(cell_count(&table), 4);

        assert!(!delete_row(&mut table, 9));
    }

    #[test]
    fn test_delete_row_reseats_spanning_origin() {
        let mut table = build_table(3, 3).unwrap();
        // Vertical merge: origin in row 1 spanning into row 2
        assert!(merge_cells(
            &mut table,
            CellAddress::new(1, 0),
            CellAddress::new(2, 0)
        ));
        assert_eq!(cell_count(&table), 8);

        assert!(delete_row(&mut table, 1));
        assert_eq!(cell_count(&table), 6);

        // The merged cell moved into the following row, one row shorter,
        // and every position in that row is still occupied
        let grid = build_grid(&table);
        assert_eq!(grid.width(), 3);
        assert!(grid.occupancy[1].iter().all(Option::is_some));
        let moved = grid.origin_at(CellAddress::new(1, 0)).unwrap();
        assert_eq!((moved.rowspan, moved.colspan), (1, 1));

        let doc = Document::new(table.clone());
        let merged = doc.find(|e| e.text_content() == "Merged Content").unwrap();
        assert!(!merged.has_attr("rowspan"));
    }

    #[test]
    fn test_merge_rectangle_into_one_cell() {
        // Merging (0,0)..(1,1) of a 2x2 leaves a single spanning cell
        let mut table = build_table(2, 2).unwrap();
        assert!(merge_cells(
            &mut table,
            CellAddress::new(0, 0),
            CellAddress::new(1, 1)
        ));
        assert_eq!(cell_count(&table), 1);

        let doc = Document::new(table.clone());
        let cell = doc.find(|e| e.tag == "th").unwrap();
        assert_eq!(cell.get_attr("rowspan"), Some("2"));
        assert_eq!(cell.get_attr("colspan"), Some("2"));
        assert_eq!(cell.text_content(), "Merged Content");
    }

    #[test]
    fn test_merge_same_cell_noop() {
        let mut table = build_table(2, 2).unwrap();
        assert!(!merge_cells(
            &mut table,
            CellAddress::new(0, 0),
            CellAddress::new(0, 0)
        ));
        // Positions covered by the same origin also refuse
        assert!(!merge_cells(
            &mut table,
            CellAddress::new(5, 5),
            CellAddress::new(0, 0)
        ));
        assert_eq!(cell_count(&table), 4);
    }

    #[test]
    fn test_merge_then_split_restores_cell_count() {
        let mut table = build_table(3, 3).unwrap();
        let before = cell_count(&table);

        assert!(merge_cells(
            &mut table,
            CellAddress::new(0, 0),
            CellAddress::new(1, 1)
        ));
        assert_eq!(cell_count(&table), before - 3);

        assert!(split_cell(&mut table, CellAddress::new(0, 0)));
        assert_eq!(cell_count(&table), before);
    }

    #[test]
    fn test_split_places_cells_at_column_offset() {
        // Merge the middle column across rows 1-2 of a 3x3, then split:
        // the new cells must land between the flanking columns, not at
        // the row ends.
        let mut table = build_table(3, 3).unwrap();
        assert!(merge_cells(
            &mut table,
            CellAddress::new(1, 1),
            CellAddress::new(2, 1)
        ));
        assert!(split_cell(&mut table, CellAddress::new(1, 1)));

        let grid = build_grid(&table);
        // Every position of the 3x3 grid is occupied again
        for r in 0..3 {
            for c in 0..3 {
                assert!(
                    grid.origin_at(CellAddress::new(r, c)).is_some(),
                    "position ({r},{c}) left unoccupied"
                );
            }
        }
        // And the refilled position is a distinct 1x1 cell
        let refilled = grid.origin_at(CellAddress::new(2, 1)).unwrap();
        assert_eq!((refilled.row, refilled.col), (2, 1));
        assert_eq!((refilled.rowspan, refilled.colspan), (1, 1));
    }

    #[test]
    fn test_split_without_span_noop() {
        let mut table = build_table(2, 2).unwrap();
        assert!(!split_cell(&mut table, CellAddress::new(0, 0)));
    }

    #[test]
    fn test_delete_column_shrinks_spans() {
        let mut table = build_table(2, 3).unwrap();
        assert!(merge_cells(
            &mut table,
            CellAddress::new(1, 0),
            CellAddress::new(1, 1)
        ));
        // Deleting column 0 removes the row-0 cell but only shrinks the
        // merged cell's colspan
        assert!(delete_column(&mut table, 0));
        let doc = Document::new(table.clone());
        let merged = doc.find(|e| e.text_content() == "Merged Content").unwrap();
        assert!(merged.get_attr("colspan").is_none());
        assert_eq!(cell_count(&table), 4);
    }

    #[test]
    fn test_address_of_relative_path() {
        let table = build_table(2, 3).unwrap();
        // [tbody index, tr index, cell index]
        assert_eq!(address_of(&table, &[0, 1, 2]), Some(CellAddress::new(1, 2)));
        // Deeper paths (inside cell content) still resolve to the cell
        assert_eq!(
            address_of(&table, &[0, 0, 1, 0]),
            Some(CellAddress::new(0, 1))
        );
        assert_eq!(address_of(&table, &[7, 7]), None);
    }

    #[test]
    fn test_enhancement_idempotent() {
        let mut root = Element::new("body");
        root.children =
            crate::parse::parse_fragment("<table><tr><td>a</td><td>b</td></tr></table>");
        let mut doc = Document::new(root);

        enhance_tables(&mut doc);
        let once = render_fragment(&doc.root.children);
        assert!(once.contains(TABLE_MARKER_CLASS));
        assert!(once.contains("contenteditable=\"true\""));

        enhance_tables(&mut doc);
        let twice = render_fragment(&doc.root.children);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_grid_handles_sectioned_rows() {
        let mut root = Element::new("body");
        root.children = crate::parse::parse_fragment(
            "<table><tbody><tr><td>a</td></tr><tr><td>b</td></tr></tbody></table>",
        );
        let doc = Document::new(root);
        let table = doc.find(|e| e.tag == "table").unwrap();
        let grid = build_grid(table);
        assert_eq!(grid.occupancy.len(), 2);
        assert!(grid.origin_at(CellAddress::new(1, 0)).is_some());

        let mut table = table.clone();
        assert!(add_row(&mut table));
        // New row joined the tbody, not the table directly
        let html = render_element_string(&table);
        assert!(html.contains("</tr><tr><td"));
        assert!(html.trim_end().ends_with("</tbody></table>"));
    }
}
