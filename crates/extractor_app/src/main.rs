#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod platform;

fn main() -> Result<(), eframe::Error> {
    platform::run_app()
}
