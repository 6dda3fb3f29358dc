#![cfg(test)]

mod http;
mod inventory;
