use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gameshop_core::{
    validate::{parse_user_price, validate_new_game},
    GameRecord, InputError, Price,
};

const MAX_INPUT_LEN: usize = 64;

/// Single-line text field with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::with_value(value);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, ch: char) {
        if ch.is_control() || self.len() >= MAX_INPUT_LEN {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let next = (self.cursor as isize + delta).clamp(0, self.len() as isize);
        self.cursor = next as usize;
    }

    /// Apply an editing key. Returns `false` for keys the field ignores.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.insert(ch);
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }
}

/// Selection index into a list whose length changes under it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCursor {
    index: usize,
}

impl ListCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.index = 0;
            return;
        }
        let next = (self.index as isize + delta).clamp(0, len as isize - 1);
        self.index = next as usize;
    }

    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// Values accepted from one of the game forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFields {
    pub name: String,
    pub genre: String,
    pub price: Price,
}

#[derive(Debug, Clone, Default)]
pub struct AddGameForm {
    pub name: TextInput,
    pub genre: TextInput,
    pub price: TextInput,
    pub field: usize,
}

impl AddGameForm {
    pub const LABELS: [&'static str; 3] = ["Name", "Genre (e.g. RPG, Action, Sports)", "Price"];

    pub fn inputs(&self) -> [&TextInput; 3] {
        [&self.name, &self.genre, &self.price]
    }

    pub fn active_mut(&mut self) -> &mut TextInput {
        match self.field {
            0 => &mut self.name,
            1 => &mut self.genre,
            _ => &mut self.price,
        }
    }

    pub fn cycle_field(&mut self, delta: isize) {
        let fields = Self::LABELS.len() as isize;
        self.field = (self.field as isize + delta).rem_euclid(fields) as usize;
    }

    /// Trimmed, validated values ready for insertion.
    pub fn submission(&self) -> Result<GameFields, InputError> {
        let (name, genre) = validate_new_game(self.name.value(), self.genre.value())?;
        let price = parse_user_price(self.price.value())?;
        Ok(GameFields {
            name: name.to_string(),
            genre: genre.to_string(),
            price,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Field 0 picks the game; fields 1-3 edit its values.
#[derive(Debug, Clone, Default)]
pub struct UpdateGameForm {
    pub selection: ListCursor,
    pub name: TextInput,
    pub genre: TextInput,
    pub price: TextInput,
    pub field: usize,
}

impl UpdateGameForm {
    pub const LABELS: [&'static str; 3] = ["New name", "New genre", "New price"];
    const FIELDS: isize = 4;

    pub fn inputs(&self) -> [&TextInput; 3] {
        [&self.name, &self.genre, &self.price]
    }

    pub fn active_mut(&mut self) -> Option<&mut TextInput> {
        match self.field {
            1 => Some(&mut self.name),
            2 => Some(&mut self.genre),
            3 => Some(&mut self.price),
            _ => None,
        }
    }

    pub fn cycle_field(&mut self, delta: isize) {
        self.field = (self.field as isize + delta).rem_euclid(Self::FIELDS) as usize;
    }

    /// Prefill the inputs from the selected game.
    pub fn load(&mut self, game: Option<&GameRecord>) {
        match game {
            Some(game) => {
                self.name.set(game.name.clone());
                self.genre.set(game.genre.clone());
                self.price.set(game.price.to_string());
            }
            None => {
                self.name.clear();
                self.genre.clear();
                self.price.clear();
            }
        }
    }

    /// New values as typed; only the price is checked.
    pub fn submission(&self) -> Result<GameFields, InputError> {
        Ok(GameFields {
            name: self.name.value().to_string(),
            genre: self.genre.value().to_string(),
            price: parse_user_price(self.price.value())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn text_input_edits_multibyte_text() {
        let mut input = TextInput::with_value("Acao");
        input.move_cursor(-2);
        input.backspace();
        input.insert('ç');
        assert_eq!(input.value(), "Açao");
        input.handle_key(&key(KeyCode::End));
        input.handle_key(&key(KeyCode::Backspace));
        input.insert('ã');
        input.insert('o');
        assert_eq!(input.value(), "Açaão");
        input.handle_key(&key(KeyCode::Home));
        input.handle_key(&key(KeyCode::Delete));
        assert_eq!(input.value(), "çaão");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn text_input_ignores_control_keys() {
        let mut input = TextInput::default();
        assert!(!input.handle_key(&key(KeyCode::Enter)));
        assert!(!input.handle_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(input.handle_key(&KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)));
        assert_eq!(input.value(), "A");
    }

    #[test]
    fn list_cursor_stays_in_bounds() {
        let mut cursor = ListCursor::default();
        cursor.move_by(5, 3);
        assert_eq!(cursor.index(), 2);
        cursor.move_by(-10, 3);
        assert_eq!(cursor.index(), 0);
        cursor.move_by(2, 3);
        cursor.clamp(1);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn add_form_validates_before_submit() {
        let mut form = AddGameForm::default();
        form.name.set("  Zelda ");
        assert_eq!(form.submission(), Err(InputError::MissingFields));

        form.genre.set("Adventure");
        form.price.set("299.9");
        assert_eq!(
            form.submission(),
            Ok(GameFields {
                name: "Zelda".to_string(),
                genre: "Adventure".to_string(),
                price: Price::from_cents(29990),
            })
        );

        form.cycle_field(-1);
        assert_eq!(form.field, 2);
    }

    #[test]
    fn update_form_prefills_from_game() {
        let mut form = UpdateGameForm::default();
        let game = GameRecord::new("Doom", "FPS", Price::from_cents(1990));
        form.load(Some(&game));
        assert_eq!(form.price.value(), "19.90");
        assert!(form.active_mut().is_none());

        form.cycle_field(3);
        if let Some(input) = form.active_mut() {
            input.set("oops");
        }
        assert!(matches!(form.submission(), Err(InputError::Price(_))));
    }
}
