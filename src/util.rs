/// `(row, col)` of a cell.
pub type Pos = (u16, u16);

pub const DIRS_8: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
pub const DIRS_9: [(i8, i8); 9] = [
    (0, 0),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub fn pos_i((row, col): Pos, rows: u16, cols: u16) -> Option<usize> {
    if rows <= row || cols <= col {
        None
    } else {
        Some(row as usize * cols as usize + col as usize)
    }
}

pub fn i_pos(index: usize, rows: u16, cols: u16) -> Option<Pos> {
    let rs = rows as usize;
    let cs = cols as usize;
    if index >= rs * cs {
        None
    } else {
        Some(((index / cs) as u16, (index % cs) as u16))
    }
}

/// Offsets `dirs` from `pos`, dropping anything that falls off the grid.
pub fn valid_neighbors(
    dirs: &'static [(i8, i8)],
    (row, col): Pos,
    rows: u16,
    cols: u16,
) -> impl Iterator<Item = Pos> {
    dirs.iter()
        .map(move |(dr, dc)| (*dr as i32 + row as i32, *dc as i32 + col as i32))
        .filter(move |(r, c)| (0..rows as i32).contains(r) && (0..cols as i32).contains(c))
        .map(|(r, c)| (r as u16, c as u16))
}
