pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: (u8, u8),
    pub clear_color: [f32; 4],
    pub draw_triangle: bool,
    pub debug_output: bool,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            gl_version: (4, 6),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            draw_triangle: true,
            debug_output: cfg!(debug_assertions),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

pub struct ConfigBuilder {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: (u8, u8),
    pub clear_color: [f32; 4],
    pub draw_triangle: bool,
    pub debug_output: bool,
}

impl ConfigBuilder {
    pub fn build(self) -> Config {
        Config {
            title: self.title,
            width: self.width,
            height: self.height,
            gl_version: self.gl_version,
            clear_color: self.clear_color,
            draw_triangle: self.draw_triangle,
            debug_output: self.debug_output,
        }
    }
    pub fn title(mut self, title: impl Into<String>) -> ConfigBuilder {
        self.title = title.into();
        self
    }
    pub fn size(mut self, width: u32, height: u32) -> ConfigBuilder {
        if width == 0 || height == 0 {
            log::warn!("window size {}x{} has a zero side, using 1", width, height);
        }
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }
    pub fn gl_version(mut self, major: u8, minor: u8) -> ConfigBuilder {
        self.gl_version = (major, minor);
        self
    }
    pub fn clear_color(mut self, color: [f32; 4]) -> ConfigBuilder {
        self.clear_color = color.map(|c| c.clamp(0.0, 1.0));
        self
    }
    /// With `false` only the background is cleared each frame.
    pub fn draw_triangle(mut self, draw: bool) -> ConfigBuilder {
        self.draw_triangle = draw;
        self
    }
    pub fn debug_output(mut self, enabled: bool) -> ConfigBuilder {
        self.debug_output = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tutorial_window() {
        let config = Config::default();
        assert_eq!(config.title, "LearnOpenGL");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.gl_version, (4, 6));
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3, 1.0]);
        assert!(config.draw_triangle);
    }

    #[test]
    fn builder_overrides_and_clamps() {
        let config = Config::builder()
            .title("triangle")
            .size(0, 300)
            .clear_color([1.5, -0.2, 0.5, 1.0])
            .draw_triangle(false)
            .build();
        assert_eq!(config.title, "triangle");
        assert_eq!((config.width, config.height), (1, 300));
        assert_eq!(config.clear_color, [1.0, 0.0, 0.5, 1.0]);
        assert!(!config.draw_triangle);
    }
}
