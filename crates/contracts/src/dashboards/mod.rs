pub mod d402_superstore;
