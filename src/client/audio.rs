//! Audio Element - 播放设备抽象
//!
//! 与浏览器 `<audio>` 元素的语义一致：加载一个 object URL，
//! 支持播放、暂停、定位，自然播放结束时产生一次 ended 事件

use super::error::PlaybackError;
use super::object_url::ObjectUrl;

pub trait AudioElement: Send {
    /// 切换音源，停止当前播放并回到开头
    fn load(&mut self, url: &ObjectUrl);

    /// 开始或继续播放
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// 是否处于暂停状态
    fn paused(&self) -> bool;

    /// 当前播放位置（秒）
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// 取出待处理的 ended 事件
    ///
    /// 自然播放结束后第一次调用返回 true
    fn take_ended(&mut self) -> bool;
}
