use crate::models::{City, CITIES};

pub fn run() {
    println!("🏙️  Available cities\n");

    let default = City::default_city();
    for city in CITIES {
        let marker = if city == default { " (default)" } else { "" };
        println!("   {:<14} {}{}", city.english, city.label, marker);
    }
}
