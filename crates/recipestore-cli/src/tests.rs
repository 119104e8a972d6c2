use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["recipestore-cli", "db", "ping"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["recipestore-cli", "db", "migrate"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_db_seed_without_file() {
    let cli = Cli::try_parse_from(["recipestore-cli", "db", "seed"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { file: None }
        })
    ));
}

#[test]
fn parses_db_seed_with_file() {
    let cli = Cli::try_parse_from(["recipestore-cli", "db", "seed", "--file", "other.yaml"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { file: Some(ref f) }
        }) if f.as_os_str() == "other.yaml"
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["recipestore-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_recipes_add_with_repeated_ingredients() {
    let cli = Cli::try_parse_from([
        "recipestore-cli",
        "recipes",
        "add",
        "--name",
        "Pancakes",
        "--ingredient",
        "flour:0.2:kg",
        "--ingredient",
        "milk:0.3:l",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Recipes {
        command: RecipesCommands::Add { name, ingredients },
    }) = cli.command
    else {
        panic!("expected recipes add");
    };
    assert_eq!(name, "Pancakes");
    assert_eq!(
        ingredients,
        vec![
            IngredientRequirement::new("flour", 0.2, "kg"),
            IngredientRequirement::new("milk", 0.3, "l"),
        ]
    );
}

#[test]
fn recipes_add_requires_an_ingredient() {
    let result = Cli::try_parse_from(["recipestore-cli", "recipes", "add", "--name", "Toast"]);
    assert!(result.is_err());
}

#[test]
fn recipes_add_rejects_malformed_ingredient() {
    let result = Cli::try_parse_from([
        "recipestore-cli",
        "recipes",
        "add",
        "--name",
        "Toast",
        "--ingredient",
        "bread",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_shops_add_with_negative_longitude() {
    let cli = Cli::try_parse_from([
        "recipestore-cli",
        "shops",
        "add",
        "--name",
        "Soho Dairy",
        "--lat",
        "51.5136",
        "--lon",
        "-0.1365",
        "--item",
        "milk:10:l",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Shops {
        command: ShopsCommands::Add {
            name, lon, items, ..
        },
    }) = cli.command
    else {
        panic!("expected shops add");
    };
    assert_eq!(name, "Soho Dairy");
    assert!((lon - -0.1365).abs() < f64::EPSILON);
    assert_eq!(items, vec![IngredientRequirement::new("milk", 10.0, "l")]);
}

#[test]
fn parses_shops_delete() {
    let cli = Cli::try_parse_from(["recipestore-cli", "shops", "delete", "Soho Dairy"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Shops {
            command: ShopsCommands::Delete { ref name }
        }) if name == "Soho Dairy"
    ));
}

#[test]
fn parses_find_with_defaults() {
    let cli = Cli::try_parse_from([
        "recipestore-cli",
        "find",
        "--recipe",
        "Pancakes",
        "--lat",
        "51.5074",
        "--lon",
        "-0.1278",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Find {
            radius: None,
            route: false,
            json: false,
            ..
        })
    ));
}

#[test]
fn parses_find_with_radius_and_route() {
    let cli = Cli::try_parse_from([
        "recipestore-cli",
        "find",
        "--recipe",
        "Pancakes",
        "--lat",
        "51.5074",
        "--lon",
        "-0.1278",
        "--radius",
        "2.5",
        "--route",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Find {
            radius: Some(r),
            route: true,
            ..
        }) if (r - 2.5).abs() < f64::EPSILON
    ));
}

#[test]
fn find_requires_coordinates() {
    let result = Cli::try_parse_from(["recipestore-cli", "find", "--recipe", "Pancakes"]);
    assert!(result.is_err());
}

#[test]
fn find_rejects_a_lone_latitude() {
    let result = Cli::try_parse_from([
        "recipestore-cli",
        "find",
        "--recipe",
        "Pancakes",
        "--lat",
        "51.5",
    ]);
    assert!(result.is_err());
}

#[test]
fn find_here_replaces_coordinates() {
    let cli = Cli::try_parse_from(["recipestore-cli", "find", "--recipe", "Pancakes", "--here"])
        .expect("expected valid cli args");

    let Some(Commands::Find { origin, .. }) = cli.command else {
        panic!("expected find");
    };
    assert!(origin.here);
    assert_eq!(origin.lat, None);
    assert_eq!(origin.lon, None);
}

#[test]
fn find_here_conflicts_with_coordinates() {
    let result = Cli::try_parse_from([
        "recipestore-cli",
        "find",
        "--recipe",
        "Pancakes",
        "--here",
        "--lat",
        "51.5",
        "--lon",
        "-0.1",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_in_season_with_coordinates_and_radius() {
    let cli = Cli::try_parse_from([
        "recipestore-cli",
        "in-season",
        "--lat",
        "51.5074",
        "--lon",
        "-0.1278",
        "--radius",
        "3",
        "--json",
    ])
    .expect("expected valid cli args");

    let Some(Commands::InSeason {
        origin,
        radius,
        json,
    }) = cli.command
    else {
        panic!("expected in-season");
    };
    assert!(origin.lat.is_some_and(|v| (v - 51.5074).abs() < f64::EPSILON));
    assert!(origin.lon.is_some_and(|v| (v - -0.1278).abs() < f64::EPSILON));
    assert!(!origin.here);
    assert!(radius.is_some_and(|r| (r - 3.0).abs() < f64::EPSILON));
    assert!(json);
}

#[test]
fn in_season_accepts_here() {
    let cli = Cli::try_parse_from(["recipestore-cli", "in-season", "--here"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::InSeason { ref origin, radius: None, json: false }) if origin.here
    ));
}

#[test]
fn parse_item_splits_from_the_right() {
    let item = parse_item("salt: sea:5:g").expect("should parse");
    assert_eq!(item, IngredientRequirement::new("salt: sea", 5.0, "g"));
}

#[test]
fn parse_item_rejects_bad_quantities() {
    assert!(parse_item("flour:lots:kg").is_err());
    assert!(parse_item("flour:-1:kg").is_err());
    assert!(parse_item("flour:NaN:kg").is_err());
    assert!(parse_item(":1:kg").is_err());
    assert!(parse_item("flour:1:").is_err());
}
