//! Interactive shell over the instance command surface.
//!
//! One line is one operation. The shell tracks at most one open session at a time;
//! commands that act on behalf of a user require a prior `login`.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sodality::{Instance, Result};

/// Run the shell loop until `exit` or end of input.
pub fn run(instance: &mut Instance) -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("Sodality shell - type 'help' for commands, 'exit' to quit");

    let mut editor = DefaultEditor::new()?;
    let mut current_session: Option<String> = None;

    loop {
        let prompt = match &current_session {
            Some(id) => match instance.lookup_session(id) {
                Ok(session) => format!("{}> ", session.login()),
                Err(_) => "sodality> ".to_string(),
            },
            None => "sodality> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();

                if matches!(line, "exit" | "quit") {
                    break;
                }
                match dispatch(instance, &mut current_session, line) {
                    Ok(Some(output)) => println!("{output}"),
                    Ok(None) => {}
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use 'exit' to quit");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }
    Ok(())
}

/// Split off the first `n` words; the rest of the line is the final argument.
fn split_args(rest: &str, n: usize) -> Option<(Vec<&str>, &str)> {
    let mut words = Vec::with_capacity(n);
    let mut remainder = rest.trim_start();
    for _ in 0..n {
        let (word, tail) = remainder.split_once(char::is_whitespace)?;
        words.push(word);
        remainder = tail.trim_start();
    }
    Some((words, remainder))
}

fn word(rest: &str) -> Option<&str> {
    let w = rest.trim();
    (!w.is_empty() && !w.contains(char::is_whitespace)).then_some(w)
}

fn require(session: &Option<String>) -> std::result::Result<&str, String> {
    session
        .as_deref()
        .ok_or_else(|| "not logged in; use 'login <login> <password>'".to_string())
}

fn dispatch(
    instance: &mut Instance,
    current_session: &mut Option<String>,
    line: &str,
) -> std::result::Result<Option<String>, String> {
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    let run = |result: Result<Option<String>>| result.map_err(|e| e.to_string());

    match command {
        "help" => Ok(Some(HELP.trim_end().to_string())),

        "create-user" => {
            let (args, name) =
                split_args(rest, 2).ok_or("usage: create-user <login> <password> <name>")?;
            run(instance.create_user(args[0], args[1], name).map(|()| None))
        }
        "login" => {
            let (args, password) = split_args(rest, 1).ok_or("usage: login <login> <password>")?;
            let id = instance
                .open_session(args[0], password.trim())
                .map_err(|e| e.to_string())?;
            *current_session = Some(id);
            Ok(Some(format!("logged in as {}", args[0])))
        }
        "logout" => {
            *current_session = None;
            Ok(None)
        }
        "whoami" => {
            let session = instance
                .lookup_session(require(current_session)?)
                .map_err(|e| e.to_string())?;
            let opened = chrono::DateTime::from_timestamp_millis(session.created_at_millis() as i64)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string());
            Ok(Some(format!("{} (session opened {opened})", session.login())))
        }

        "edit" => {
            let (args, value) = split_args(rest, 1).ok_or("usage: edit <attribute> <value>")?;
            run(instance
                .edit_profile(require(current_session)?, args[0], value)
                .map(|()| None))
        }
        "attr" => {
            let (args, attribute) = split_args(rest, 1).ok_or("usage: attr <login> <attribute>")?;
            run(instance
                .user_attribute(args[0], attribute.trim())
                .map(Some))
        }

        "add-friend" => {
            let other = word(rest).ok_or("usage: add-friend <login>")?;
            run(instance
                .add_friend(require(current_session)?, other)
                .map(|()| None))
        }
        "add-crush" => {
            let other = word(rest).ok_or("usage: add-crush <login>")?;
            run(instance
                .add_crush(require(current_session)?, other)
                .map(|()| None))
        }
        "add-idol" => {
            let other = word(rest).ok_or("usage: add-idol <login>")?;
            run(instance
                .add_idol(require(current_session)?, other)
                .map(|()| None))
        }
        "add-enemy" => {
            let other = word(rest).ok_or("usage: add-enemy <login>")?;
            run(instance
                .add_enemy(require(current_session)?, other)
                .map(|()| None))
        }
        "friends" => {
            let login = resolve_login(instance, current_session, rest)?;
            run(instance.friend_list(&login).map(Some))
        }
        "fans" => {
            let login = resolve_login(instance, current_session, rest)?;
            run(instance.fan_list(&login).map(Some))
        }
        "crushes" => run(instance.crush_list(require(current_session)?).map(Some)),
        "is-friend" => {
            let (args, other) = split_args(rest, 1).ok_or("usage: is-friend <login> <other>")?;
            run(instance
                .is_friend(args[0], other.trim())
                .map(|v| Some(v.to_string())))
        }
        "is-fan" => {
            let (args, idol) = split_args(rest, 1).ok_or("usage: is-fan <login> <idol>")?;
            run(instance
                .is_fan(args[0], idol.trim())
                .map(|v| Some(v.to_string())))
        }

        "send" => {
            let (args, body) = split_args(rest, 1).ok_or("usage: send <login> <message>")?;
            run(instance
                .send_message(require(current_session)?, args[0], body)
                .map(|()| None))
        }
        "read" => run(instance.read_message(require(current_session)?).map(Some)),

        "create-community" => {
            let (args, description) =
                split_args(rest, 1).ok_or("usage: create-community <name> <description>")?;
            run(instance
                .create_community(require(current_session)?, args[0], description)
                .map(|()| None))
        }
        "join" => {
            let name = word(rest).ok_or("usage: join <community>")?;
            run(instance
                .join_community(require(current_session)?, name)
                .map(|()| None))
        }
        "communities" => {
            let login = resolve_login(instance, current_session, rest)?;
            run(instance.communities_of(&login).map(Some))
        }
        "members" => {
            let name = word(rest).ok_or("usage: members <community>")?;
            run(instance.community_members(name).map(Some))
        }
        "describe" => {
            let name = word(rest).ok_or("usage: describe <community>")?;
            run(instance.community_description(name).map(Some))
        }
        "manager" => {
            let name = word(rest).ok_or("usage: manager <community>")?;
            run(instance.community_manager(name).map(Some))
        }
        "post" => {
            let (args, body) = split_args(rest, 1).ok_or("usage: post <community> <message>")?;
            run(instance
                .post_to_community(require(current_session)?, args[0], body)
                .map(|()| None))
        }
        "read-community" => run(instance
            .read_community_message(require(current_session)?)
            .map(Some)),

        "delete-account" => {
            let session = require(current_session)?.to_owned();
            instance.delete_account(&session).map_err(|e| e.to_string())?;
            *current_session = None;
            Ok(Some("account deleted".to_string()))
        }
        "reset" => {
            *current_session = None;
            run(instance.reset().map(|()| None))
        }
        "save" => run(instance.save().map(|()| Some("saved".to_string()))),

        _ => Err(format!("unknown command '{command}'; type 'help'")),
    }
}

/// An explicit login argument wins; otherwise fall back to the open session.
fn resolve_login(
    instance: &Instance,
    current_session: &Option<String>,
    rest: &str,
) -> std::result::Result<String, String> {
    if let Some(login) = word(rest) {
        return Ok(login.to_owned());
    }
    let session = instance
        .lookup_session(require(current_session)?)
        .map_err(|e| e.to_string())?;
    Ok(session.login().to_owned())
}

const HELP: &str = "\
accounts
  create-user <login> <password> <name>   register a new user
  login <login> <password>                open a session
  logout | whoami                         session management
  edit <attribute> <value>                edit profile (name, password, login, or extras)
  attr <login> <attribute>                read any user's attribute
  delete-account                          delete the logged-in account (cascades)

relationships
  add-friend | add-crush | add-idol | add-enemy <login>
  friends [login]   fans [login]   crushes
  is-friend <login> <other>   is-fan <login> <idol>

messages
  send <login> <message>                  direct message
  read                                    read the oldest direct message
  post <community> <message>              broadcast to a community
  read-community                          read the oldest community message

communities
  create-community <name> <description>
  join <community>   members <community>   describe <community>   manager <community>
  communities [login]

system
  save    reset    exit
";
