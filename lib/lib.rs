/// Board, pieces, movement rules and turn keeping.
pub mod chess;
