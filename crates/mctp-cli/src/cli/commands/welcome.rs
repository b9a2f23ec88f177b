//! `mctp welcome` – print the built-in welcome page.

use mctp_core::page;

pub fn run_welcome() {
    print!("{}", page::welcome_page().document);
}
