use crate::utils;

pub fn normalize(text: &str) {
    println!("{}", utils::normalize(text));
}
