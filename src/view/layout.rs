/// 左侧面板的最小宽度，同时也是右侧保留的宽度
pub const MIN_PANEL_WIDTH: i32 = 300;

/// 左侧面板默认宽度
pub const DEFAULT_PANEL_WIDTH: i32 = 384;

/// 可拖拽的左右分栏
///
/// 宽度只在本次会话内有效，不持久化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLayout {
    left_width: i32,
    dragging: bool,
    viewport_width: i32,
}

impl SplitLayout {
    pub fn new(viewport_width: u32) -> Self {
        Self {
            left_width: DEFAULT_PANEL_WIDTH,
            dragging: false,
            viewport_width: i32::try_from(viewport_width).unwrap_or(i32::MAX),
        }
    }

    pub fn left_width(&self) -> i32 {
        self.left_width
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// 拖拽中鼠标移动到 `mouse_x`
    ///
    /// 宽度限制在 `[300, viewport - 300]`；视口过窄时以上限为准。
    /// 未在拖拽时忽略
    pub fn drag_to(&mut self, mouse_x: i32, container_left: i32) -> i32 {
        if self.dragging {
            self.left_width = clamp_width(mouse_x - container_left, self.viewport_width);
        }
        self.left_width
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn resize_viewport(&mut self, viewport_width: u32) {
        self.viewport_width = i32::try_from(viewport_width).unwrap_or(i32::MAX);
    }
}

fn clamp_width(width: i32, viewport_width: i32) -> i32 {
    width
        .max(MIN_PANEL_WIDTH)
        .min(viewport_width.saturating_sub(MIN_PANEL_WIDTH))
}
