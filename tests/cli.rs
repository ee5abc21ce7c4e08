mod common;

use common::TestEnv;
use predicates::str::contains;

#[test]
fn quit_immediately_exits_zero() {
    let env = TestEnv::new();
    env.run_script("json", "0\n")
        .success()
        .stdout(contains("Menu"))
        .stdout(contains("Add movie"))
        .stdout(contains("Bye."));
}

#[test]
fn invalid_menu_choice_reprompts_without_dispatching() {
    let env = TestEnv::new();
    env.run_script("json", "99\nnope\n0\n")
        .success()
        .stdout(contains("Enter a value between 0 and 12."))
        .stdout(contains("Not a valid number"));
}

#[test]
fn closed_stdin_is_a_clean_quit() {
    let env = TestEnv::new();
    env.run_script("json", "").success();
}

#[test]
fn login_prompt_creates_user_on_first_login() {
    let env = TestEnv::new();
    env.cmd("json")
        .write_stdin("carol\n0\n")
        .assert()
        .success()
        .stdout(contains("Logged in as carol"));
    // Second session lists the known user before prompting.
    env.cmd("json")
        .write_stdin("carol\n0\n")
        .assert()
        .success()
        .stdout(contains("Known users: carol"));
}

#[test]
fn manual_mode_hint_shown_without_api_config() {
    let env = TestEnv::new();
    env.run_script("json", "0\n")
        .success()
        .stdout(contains("adds use manual entry"));
}

#[test]
fn empty_user_flag_is_rejected() {
    let env = TestEnv::new();
    env.cmd("json")
        .arg("--user")
        .arg("   ")
        .write_stdin("")
        .assert()
        .failure();
}
