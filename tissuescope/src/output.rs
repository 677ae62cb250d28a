use dataset::RowWarning;
use tissue::TissueProfile;
use tissuescope_core::{visible_parameters, Navigation, SessionMessage};

pub fn print_info(message: &str) {
    println!("[TissueScope][INFO] {message}");
}

pub fn print_warning(message: &str) {
    eprintln!("[TissueScope][WARN]: {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[TissueScope][ERROR]: {message}");
}

pub fn print_messages(messages: &[SessionMessage]) {
    for message in messages {
        match message.level {
            tissuescope_core::MessageLevel::Info => print_info(&message.text),
            tissuescope_core::MessageLevel::Warning => print_warning(&message.text),
            tissuescope_core::MessageLevel::Error => print_error(&message.text),
        }
    }
}

pub fn print_navigation(navigation: &Navigation) {
    print_info(&format!("{} mode", navigation.mode()));
    for section in navigation.sections() {
        println!("{}", section.title);
        for page in section.pages {
            let marker = if *page == navigation.default_page() {
                " (default)"
            } else {
                ""
            };
            println!("\t{}{marker}", page.title());
            let keys = visible_parameters(navigation.mode(), *page);
            if !keys.is_empty() {
                let names: Vec<&str> = keys.iter().map(|key| key.name()).collect();
                println!("\t\tparameters: {}", names.join(", "));
            }
        }
    }
}

pub fn print_analysis(profile: &TissueProfile, depth: f64, threshold: f64) {
    print_info(&format!(
        "Maximum transmission at {:.0} nm for {depth:.1} mm of tissue",
        profile.max_transmission_wavelength
    ));
    let bands = profile.high_absorption_bands(threshold);
    if bands.is_empty() {
        println!("No band absorbs more than {threshold:.0}%");
    } else {
        println!("Water absorbs more than {threshold:.0}% in:");
        for (start, end) in bands {
            println!("\t{start:.0}-{end:.0} nm");
        }
    }
    if let Some(comparison) = &profile.two_photon {
        println!("Two-photon comparison:");
        for (label, wavelength, idx) in [
            ("lambda_a", comparison.lambda_a, 0),
            ("lambda_b", comparison.lambda_b, 1),
            ("lambda_c", comparison.lambda_c, 2),
        ] {
            println!(
                "\t{label}: {wavelength:.0} nm, transmission {:.3}, water absorption {:.1}%",
                comparison.transmission[idx],
                comparison.water_absorption[idx] * 100.0
            );
        }
    }
}

pub fn print_load_summary(kind: &str, records: usize, warnings: &[RowWarning]) {
    print_info(&format!("{records} {kind} loaded, {} rows skipped", warnings.len()));
    for warning in warnings {
        print_warning(&warning.to_string());
    }
}
