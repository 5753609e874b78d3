use clap::Parser;
use skillscape::adapters::{HeadlessMap, MapboxGeocoder, SimulatedOutcome, SimulatedRecognizer, TracingNotifier};
use skillscape::config::cli::{load_catalog, Command, OnboardArgs};
use skillscape::domain::model::Profile;
use skillscape::utils::error::ErrorSeverity;
use skillscape::utils::logger;
use skillscape::{AppConfig, CliConfig, CoordinateTable, Explorer, OnboardingSession, SkillScapeError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.app_config() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.logging.format, cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<(), SkillScapeError> {
    match command {
        Command::Search(args) => {
            let catalog = load_catalog(config)?;
            let results = skillscape::filter(catalog.profiles(), &args.criteria());
            if results.is_empty() {
                println!("No results found");
            }
            for profile in results {
                print_summary(profile);
            }
        }
        Command::Skills => {
            let catalog = load_catalog(config)?;
            for tag in catalog.skill_tags() {
                println!("{}", tag);
            }
        }
        Command::Show { id } => {
            let catalog = load_catalog(config)?;
            print_card(catalog.require(id)?);
        }
        Command::Markers(args) => {
            let catalog = load_catalog(config)?;
            let mut explorer = explorer(catalog, config, None)?;
            explorer.set_criteria(args.criteria());
            for marker in explorer.markers() {
                println!("{:>3}  {}", marker.profile_id, marker.position);
            }
        }
        Command::Locate { place } => {
            let catalog = load_catalog(config)?;
            let geocoder = MapboxGeocoder::from_config(&config.geocoding)?;
            let mut explorer = explorer(catalog, config, Some(geocoder))?;
            if let Some(location) = explorer.search_location(&place).await? {
                println!(
                    "{}  ({}, zoom {})",
                    location.display_name,
                    explorer.map().center(),
                    explorer.map().zoom()
                );
            }
        }
        Command::Onboard(args) => onboard(args, config).await?,
    }
    Ok(())
}

fn explorer(
    catalog: skillscape::Catalog,
    config: &AppConfig,
    geocoder: Option<MapboxGeocoder>,
) -> Result<Explorer<MapboxGeocoder, HeadlessMap, TracingNotifier>, SkillScapeError> {
    let geocoder = match geocoder {
        Some(geocoder) => geocoder,
        None => MapboxGeocoder::new(
            config.geocoding.endpoint.clone(),
            config.geocoding.access_token.clone().unwrap_or_default(),
            std::time::Duration::from_secs(config.geocoding.timeout_seconds),
        )?,
    };
    Ok(Explorer::new(
        catalog,
        CoordinateTable::sample(),
        geocoder,
        HeadlessMap::new(&config.map),
        TracingNotifier::new(true),
        &config.map,
    ))
}

async fn onboard(args: OnboardArgs, config: &AppConfig) -> Result<(), SkillScapeError> {
    let mut recognizer = SimulatedRecognizer::from_config(&config.onboarding);
    if args.fail {
        recognizer = recognizer.with_outcome(SimulatedOutcome::RecognitionError(
            "no speech detected".to_string(),
        ));
    }
    let mut session = OnboardingSession::new(recognizer, TracingNotifier::new(true));

    println!("🎙️  Recording...");
    session.start_recording()?;
    println!("⏳ Processing voice input...");
    session.finish_recording().await?;

    let flow = session.flow_mut();
    for (field, value) in args.field_edits() {
        flow.set_field(field, value)?;
    }
    if !args.skills.is_empty() {
        while flow.remove_skill_slot(0)? {}
        flow.set_skill(0, args.skills[0].clone())?;
        for skill in &args.skills[1..] {
            let index = flow.add_skill_slot()?;
            flow.set_skill(index, skill.clone())?;
        }
    }

    let submitted = session.submit()?;
    println!("Name:     {}", submitted.name);
    println!("Skills:   {}", submitted.skills.join(", "));
    println!("Location: {}", submitted.location);
    println!("Rate:     ${}/hr", submitted.hourly_rate);
    println!("About:    {}", submitted.about);
    Ok(())
}

fn print_summary(profile: &Profile) {
    let skills: Vec<&str> = profile.skill_names().collect();
    println!(
        "{:>3}  {:<18} ★ {:.1}  {:<12} {:<18} {}",
        profile.id,
        profile.name,
        profile.rating,
        if profile.is_available { "Available" } else { "Unavailable" },
        profile.location,
        skills.join(", ")
    );
}

fn print_card(profile: &Profile) {
    println!("[{}] {}", profile.initials(), profile.name);
    println!(
        "★ {:.1} ({} reviews)  {}",
        profile.rating,
        profile.reviews,
        if profile.is_available { "Available Now" } else { "Unavailable" }
    );
    println!("📍 {}", profile.location);
    println!();
    println!("{}", profile.about);
    println!();
    println!("Skills:");
    for skill in &profile.skills {
        println!("  {:<20} {:<12} ${}/hr", skill.name, skill.level, skill.hourly_rate);
    }
    if !profile.review_details.is_empty() {
        println!();
        println!("Reviews:");
        for review in &profile.review_details {
            println!("  {} {}", "★".repeat(review.rating as usize), review.author);
            println!("    {}", review.text);
        }
    }
}
