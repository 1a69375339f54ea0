//! UI renderer trait
//!
//! Input is read on its own thread (see [`crate::input`]), so renderers only
//! draw and manage the terminal lifecycle.

use crate::error::Result;
use crate::ui::{TableSnapshot, ViewState};

/// Core trait for drawing the table view
pub trait UIRenderer {
    /// Draw one frame: the header, the snapshot rows and the status line
    fn render(&mut self, view_state: &ViewState, table: &TableSnapshot) -> Result<()>;

    /// Initialize the terminal UI
    ///
    /// Enters raw mode and the alternate screen.
    fn initialize(&mut self) -> Result<()>;

    /// Clean up and restore terminal state
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock UI renderer for testing
    ///
    /// Records how often it was asked to draw and the last snapshot it got.
    pub struct MockUIRenderer {
        pub render_count: usize,
        pub terminal_size: (u16, u16),
        pub is_initialized: bool,
        pub last_table: Option<TableSnapshot>,
        pub last_status: Option<String>,
    }

    impl Default for MockUIRenderer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUIRenderer {
        pub fn new() -> Self {
            Self {
                render_count: 0,
                terminal_size: (80, 24),
                is_initialized: false,
                last_table: None,
                last_status: None,
            }
        }

        /// Set terminal size for testing
        pub fn set_terminal_size(&mut self, width: u16, height: u16) {
            self.terminal_size = (width, height);
        }
    }

    impl UIRenderer for MockUIRenderer {
        fn render(&mut self, view_state: &ViewState, table: &TableSnapshot) -> Result<()> {
            self.render_count += 1;
            self.last_table = Some(table.clone());
            self.last_status = Some(view_state.format_status_line());
            Ok(())
        }

        fn initialize(&mut self) -> Result<()> {
            self.is_initialized = true;
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            self.is_initialized = false;
            Ok(())
        }

        fn get_terminal_size(&self) -> Result<(u16, u16)> {
            Ok(self.terminal_size)
        }
    }

    #[test]
    fn test_mock_renderer_basic() {
        let mut renderer = MockUIRenderer::new();
        let view_state = ViewState::new("/test.log", 80, 24);
        let table = TableSnapshot {
            headers: vec!["level".to_string()],
            ..TableSnapshot::default()
        };

        assert!(!renderer.is_initialized);
        renderer.initialize().unwrap();
        assert!(renderer.is_initialized);

        assert_eq!(renderer.render_count, 0);
        renderer.render(&view_state, &table).unwrap();
        assert_eq!(renderer.render_count, 1);
        assert_eq!(renderer.last_table.as_ref(), Some(&table));
        assert_eq!(renderer.last_status.as_deref(), Some("test.log | Empty"));

        renderer.set_terminal_size(120, 40);
        assert_eq!(renderer.get_terminal_size().unwrap(), (120, 40));

        renderer.cleanup().unwrap();
        assert!(!renderer.is_initialized);
    }
}
