//! Economy: shop stock, buying and selling

pub mod shop;

pub use shop::{buy, sell, sell_price, Shop, DEFAULT_STOCK_SIZE, SELL_PRICE_MULTIPLIER};
