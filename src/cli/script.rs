use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One step of a `type` key script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptKey {
    /// Typed into the input
    Text(char),
    /// Pressed before the input sees it
    Key(KeyEvent),
    /// Idle until the pending query expires
    Wait,
}

impl ScriptKey {
    /// Short label for output
    pub fn label(&self) -> String {
        match self {
            ScriptKey::Text(c) => c.to_string(),
            ScriptKey::Key(key) => match (key.modifiers, key.code) {
                (m, KeyCode::Char(c)) if m.contains(KeyModifiers::CONTROL) => format!("<ctrl-{}>", c),
                (_, code) => format!("<{}>", key_name(code)),
            },
            ScriptKey::Wait => "~".to_string(),
        }
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Left => "left".into(),
        KeyCode::Right => "right".into(),
        KeyCode::Up => "up".into(),
        KeyCode::Down => "down".into(),
        KeyCode::Home => "home".into(),
        KeyCode::End => "end".into(),
        KeyCode::PageUp => "pageup".into(),
        KeyCode::PageDown => "pagedown".into(),
        KeyCode::Delete => "delete".into(),
        KeyCode::Backspace => "backspace".into(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

/// Parse a named key (`left`, `pageup`, `ctrl-a`, ...).
pub fn parse_key_name(name: &str) -> Option<KeyEvent> {
    let code = match name.to_ascii_lowercase().as_str() {
        "ctrl-a" | "cmd-a" => {
            return Some(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        }
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" | "del" => KeyCode::Delete,
        "backspace" | "bs" => KeyCode::Backspace,
        _ => return None,
    };
    Some(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Split a script into steps.
pub fn parse_script(script: &str) -> Result<Vec<ScriptKey>, String> {
    let mut keys = Vec::new();
    let mut chars = script.chars();
    while let Some(c) = chars.next() {
        match c {
            '~' => keys.push(ScriptKey::Wait),
            '<' => {
                let name: String = chars.by_ref().take_while(|&c| c != '>').collect();
                let key = parse_key_name(&name)
                    .ok_or_else(|| format!("unknown key <{}>", name))?;
                keys.push(ScriptKey::Key(key));
            }
            c => keys.push(ScriptKey::Text(c)),
        }
    }
    Ok(keys)
}
