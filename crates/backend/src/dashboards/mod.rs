pub mod d410_ecommerce_overview;
