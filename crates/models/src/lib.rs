pub mod errors;
pub mod db;
pub mod customer;

#[cfg(test)]
mod tests;
