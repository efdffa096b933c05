//! Aggregation scenarios driven from raw log text.

use kolstat_types::AnalysisConfig;

use super::{Aggregator, Analysis, analyze};
use crate::encounter::EncounterParser;

fn run(text: &str) -> Analysis {
    let config = AnalysisConfig::default();
    let parsed = EncounterParser::new(&config).parse(text.lines());
    analyze(&parsed.encounters, &config)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn won_fight(number: u32, monster: &str, tail: &str) -> String {
    format!(
        "[{number}] Zone\n\
         Encounter: {monster}\n\
         Round 1: {monster} takes 5 damage.\n\
         Round 2: You win the fight!\n\
         {tail}"
    )
}

#[test]
fn goblin_end_to_end() {
    let analysis = run("Class: Seal Clubber\n\
         Mus: 100, tnp = 50\n\
         [1] Zone\n\
         Encounter: Goblin\n\
         Round 1: you attack!\n\
         Goblin wins initiative!\n\
         Goblin takes 5 damage.\n\
         You win the fight!\n\
         You gain 50 Meat\n\
         You acquire an item: goblin hat\n\
         You gain 12 Muscle\n");

    assert_eq!(analysis.combats, 1);
    assert_eq!(analysis.monsters.len(), 1);
    let goblin = analysis.monster("Goblin").unwrap();
    assert_eq!(goblin.encountered, 1);
    assert_eq!(goblin.defeated, 1);

    let stats = goblin.stats.unwrap();
    assert!(approx(stats.average, 12.0 / 1.1));
    assert_eq!(goblin.level, 43);

    let meat = goblin.meat.unwrap();
    assert_eq!(meat.average, 50.0);
    assert_eq!(goblin.meat_samples, vec![50.0]);

    let hat = goblin.item("goblin hat").unwrap();
    assert_eq!(hat.found, 1);
    assert_eq!(hat.rate, Some(1.0));

    // init 0 + (100 - 43 - 0)
    assert_eq!(goblin.jump_inits, vec![57]);
    assert_eq!(goblin.initiative.upper, Some(156));
    assert_eq!(goblin.initiative.lower, None);
    assert_eq!(goblin.initiative.guess, None);
    assert!(analysis.warnings.is_empty());
}

#[test]
fn every_win_dropped_is_full_rate() {
    let mut log = String::from("Class: Disco Bandit\n");
    for n in 1..=5 {
        log += &won_fight(n, "Goblin", "You acquire an item: goblin hat\n");
    }
    let analysis = run(&log);
    let goblin = analysis.monster("Goblin").unwrap();
    assert_eq!(goblin.defeated, 5);
    let hat = goblin.item("goblin hat").unwrap();
    assert_eq!(hat.found, 5);
    assert_eq!(hat.prevented, 0);
    assert_eq!(hat.rate, Some(1.0));
}

#[test]
fn all_trials_prevented_is_unknown_rate() {
    let mut log = String::from("Class: Disco Bandit\n");
    for n in 1..=3 {
        log += &won_fight(
            n,
            "Goblin",
            "Round 2: Stinky tries to steal an item!\n\
             You acquire an item: goblin hat\n",
        );
    }
    let analysis = run(&log);
    let hat = analysis.monster("Goblin").unwrap().item("goblin hat").unwrap();
    assert_eq!(hat.stolen, 3);
    assert_eq!(hat.prevented, 3);
    assert_eq!(hat.found, 0);
    assert_eq!(hat.rate, None);
    assert_eq!(hat.trials.stolen, 3);
}

#[test]
fn item_bonus_and_buffs_divide_rate() {
    let log = String::from("Class: Disco Bandit\nItem: +30%\n")
        + &won_fight(
            1,
            "Goblin",
            "You acquire an effect: Disco Concentration (duration: 5 Adventures)\n\
             You acquire an item: goblin hat\n",
        )
        + &won_fight(2, "Goblin", "");
    let analysis = run(&log);
    let hat = analysis.monster("Goblin").unwrap().item("goblin hat").unwrap();
    assert!(approx(hat.rate.unwrap(), 1.0 / 1.5 / 2.0));
    assert_eq!(hat.trials.dropped, vec![1.5]);
    assert_eq!(hat.trials.not_dropped, vec![1.3]);
}

#[test]
fn non_positive_item_multiplier_falls_back_to_one() {
    let log = String::from("Class: Disco Bandit\nItem: -100%\n")
        + &won_fight(1, "Goblin", "You acquire an item: goblin hat\n")
        + &won_fight(2, "Goblin", "");
    let analysis = run(&log);
    assert_eq!(analysis.warnings.len(), 1);
    assert_eq!(
        analysis.warnings.iter().next(),
        Some("Ignoring non-positive item multiplier: 0")
    );
    let hat = analysis.monster("Goblin").unwrap().item("goblin hat").unwrap();
    assert_eq!(hat.trials.dropped, vec![1.0]);
    assert_eq!(hat.trials.not_dropped, vec![1.0]);
    assert!(approx(hat.rate.unwrap(), 0.5));
}

#[test]
fn huge_monster_level_does_not_overflow() {
    let log = String::from("ML: +99999999999999999999\n")
        + &won_fight(1, "Goblin", "You gain 3 Muscle\n");
    let analysis = run(&log);
    let goblin = analysis.monster("Goblin").unwrap();
    assert_eq!(goblin.level, 12);
    assert_eq!(goblin.jumped_inits, vec![-4_999_999_700]);
    assert_eq!(goblin.initiative.lower, Some(-4_999_999_699));
}

#[test]
fn stat_day_applies_above_threshold() {
    let log = String::from("Class: Seal Clubber\nMuscle bonus today\n")
        + &won_fight(1000, "Goblin", "You gain 11 Muscle\n")
        + &won_fight(1001, "Goblin", "You gain 27 Muscle\n");
    let analysis = run(&log);
    let goblin = analysis.monster("Goblin").unwrap();
    assert_eq!(goblin.stat_samples.len(), 2);
    assert!(approx(goblin.stat_samples[0], 10.0));
    assert!(approx(goblin.stat_samples[1], 20.0));
}

#[test]
fn exp_and_meat_modifiers_normalize_samples() {
    let log = String::from("Class: Pastamancer\nExp: +2\nMeat: +100%\n")
        + &won_fight(1, "Goblin", "You gain 40 Meat\nYou gain 11 Wizardliness\n");
    let analysis = run(&log);
    let goblin = analysis.monster("Goblin").unwrap();
    assert!(approx(goblin.stat_samples[0], 10.0 - 4.0));
    assert_eq!(goblin.meat_samples, vec![20.0]);
}

#[test]
fn initiative_sample_uses_tiered_penalty() {
    let analysis = run("ML: +25\n\
         Init: +50\n\
         [1] Zone\n\
         Encounter: Goblin\n\
         Round 0: Grumpy wins initiative!\n\
         Round 1: Goblin takes 3 damage.\n");
    let goblin = analysis.monster("Goblin").unwrap();
    assert_eq!(goblin.defeated, 0);
    assert_eq!(goblin.jump_inits, vec![45]);
    assert_eq!(goblin.initiative.upper, Some(144));
}

#[test]
fn unknown_class_warns_once_and_stays_neutral() {
    let log = won_fight(1, "Goblin", "You gain 10 Muscle\n")
        + &won_fight(2, "Goblin", "You gain 10 Muscle\n");
    let analysis = run(&log);
    assert_eq!(analysis.warnings.len(), 1);
    assert!(analysis.warnings.iter().next().unwrap().starts_with("Invalid class: unknown"));
    let goblin = analysis.monster("Goblin").unwrap();
    assert_eq!(goblin.stat_samples, vec![10.0, 10.0]);
}

#[test]
fn noncombats_are_tallied_not_filed() {
    let analysis = run("[1] Zone\n\
         Encounter: A Quiet Glade\n\
         \n\
         [2] Zone\n\
         Encounter: A Quiet Glade\n\
         \n\
         Class: Sauceror\n");
    assert_eq!(analysis.combats, 0);
    assert!(analysis.monsters.is_empty());
    assert_eq!(analysis.noncombats.get("A Quiet Glade"), Some(&2));
    assert_eq!(analysis.noncombats.len(), 1);
}

#[test]
fn monsters_sorted_by_name() {
    let log = String::from("Class: Sauceror\n")
        + &won_fight(1, "zombie", "")
        + &won_fight(2, "Goblin", "")
        + &won_fight(3, "bat", "");
    let names: Vec<String> = run(&log).monsters.into_iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["Goblin", "bat", "zombie"]);
}

#[test]
fn alias_copy_filed_twice_imported_once() {
    let config = AnalysisConfig::default();
    let log = String::from("Class: Disco Bandit\n")
        + &won_fight(
            1,
            "smut orc screwer",
            "You gain a Muscle point!\nYou acquire an item: orc wrist\n",
        );
    let parsed = EncounterParser::new(&config).parse(log.lines());
    assert_eq!(parsed.encounters.len(), 2);

    let mut aggregator = Aggregator::new(&config);
    for (i, enc) in parsed.encounters.iter().enumerate() {
        aggregator.add(i, enc);
    }
    assert_eq!(aggregator.context().stat_bases[0], 0);
    assert_eq!(aggregator.context().stat_points[0], 1);

    let analysis = aggregator.finish(&parsed.encounters);
    assert_eq!(analysis.combats, 2);
    let orc = analysis.monster("smut orc screwer").unwrap();
    let virtual_orc = analysis.monster("(normal smut orc)").unwrap();
    assert_eq!(orc.defeated, 1);
    assert_eq!(virtual_orc.defeated, 1);
    assert_eq!(virtual_orc.item("(smut orc equipment)").unwrap().rate, Some(1.0));
    assert_eq!(orc.item("orc wrist").unwrap().found, 1);
}

#[test]
fn misc_items_do_not_count_as_drops() {
    let log = String::from("Class: Disco Bandit\n")
        + &won_fight(
            1,
            "Goblin",
            "Round 2: Sly brokers a quick deal, and splits the profits with you.\n\
             You acquire an item: goblin hat\n",
        )
        + &won_fight(2, "Goblin", "");
    let analysis = run(&log);
    let hat = analysis.monster("Goblin").unwrap().item("goblin hat").unwrap();
    assert_eq!(hat.misc, 1);
    assert_eq!(hat.found, 0);
    assert!(approx(hat.rate.unwrap(), 0.0));
}
