//! 选项标识映射 - 业务能力层
//!
//! 在三种坐标之间转换：
//! - 选项的音频文件名
//! - 页面音频元素上的加密ID
//! - 可见选项列表中的序号
//!
//! 映射只基于当前题目的页面快照，换题后必须重新读取快照。

use crate::models::file_name_from_uri;
use crate::page::{ChoiceBox, PageState};

/// 选项标识映射器
pub struct ChoiceTagMapper<'a> {
    state: &'a PageState,
}

impl<'a> ChoiceTagMapper<'a> {
    pub fn new(state: &'a PageState) -> Self {
        Self { state }
    }

    /// 根据加密ID获取页面上对应音频的文件名
    pub fn filename_for(&self, remote_id: &str) -> Option<&'a str> {
        self.state
            .audios
            .iter()
            .find(|audio| audio.id == remote_id)
            .map(|audio| file_name_from_uri(&audio.src))
    }

    /// 根据文件名获取页面上对应音频的加密ID（音频源路径的文件名部分必须完全一致）
    pub fn remote_id_for(&self, filename: &str) -> Option<&'a str> {
        if filename.is_empty() {
            return None;
        }
        self.state
            .audios
            .iter()
            .find(|audio| file_name_from_uri(&audio.src) == filename)
            .map(|audio| audio.id.as_str())
    }

    /// 加密ID在指定区域可见选项中的序号
    pub fn ui_index_for(&self, remote_id: &str, choice_box: ChoiceBox) -> Option<usize> {
        self.state
            .tags(choice_box)
            .iter()
            .position(|tag| tag == remote_id)
    }

    /// 指定区域全部可见选项的标识，按页面顺序
    pub fn tags_of(&self, choice_box: ChoiceBox) -> &'a [String] {
        self.state.tags(choice_box)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestType;
    use crate::page::RenderedAudio;

    fn state() -> PageState {
        PageState {
            origin: "http://ears.local".into(),
            test_id: "1".into(),
            test_type: TestType::SingleChoice,
            question_index: 0,
            question_count: 1,
            current_music_id: "idB".into(),
            audios: vec![
                RenderedAudio { id: "idA".into(), src: "/upload/a.mp3".into() },
                RenderedAudio { id: "idB".into(), src: "/upload/b.mp3".into() },
                RenderedAudio { id: "idC".into(), src: "/upload/c.mp3".into() },
            ],
            upper_tags: vec!["1".into(), "0".into()],
            lower_tags: vec!["idB".into(), "idA".into(), "idC".into()],
        }
    }

    #[test]
    fn filename_and_remote_id_are_inverse() {
        let state = state();
        let mapper = ChoiceTagMapper::new(&state);
        assert_eq!(mapper.filename_for("idC"), Some("c.mp3"));
        assert_eq!(mapper.remote_id_for("c.mp3"), Some("idC"));
        assert_eq!(mapper.filename_for("idZ"), None);
        assert_eq!(mapper.remote_id_for("z.mp3"), None);
    }

    #[test]
    fn filename_round_trips_to_rendered_position() {
        let state = state();
        let mapper = ChoiceTagMapper::new(&state);
        for (position, tag) in state.lower_tags.iter().enumerate() {
            let filename = mapper.filename_for(tag).unwrap();
            let remote_id = mapper.remote_id_for(filename).unwrap();
            assert_eq!(mapper.ui_index_for(remote_id, ChoiceBox::Lower), Some(position));
        }
    }

    #[test]
    fn filename_does_not_match_a_longer_name_ending_with_it() {
        let mut state = state();
        state.audios.insert(
            0,
            RenderedAudio { id: "idBA".into(), src: "/upload/ba.mp3".into() },
        );
        let mapper = ChoiceTagMapper::new(&state);
        assert_eq!(mapper.remote_id_for("a.mp3"), Some("idA"));
        assert_eq!(mapper.remote_id_for("ba.mp3"), Some("idBA"));
    }

    #[test]
    fn empty_filename_matches_nothing() {
        let state = state();
        let mapper = ChoiceTagMapper::new(&state);
        assert_eq!(mapper.remote_id_for(""), None);
    }

    #[test]
    fn tags_follow_box() {
        let state = state();
        let mapper = ChoiceTagMapper::new(&state);
        assert_eq!(mapper.tags_of(ChoiceBox::Upper), ["1", "0"]);
        assert_eq!(mapper.ui_index_for("0", ChoiceBox::Upper), Some(1));
        assert_eq!(mapper.ui_index_for("0", ChoiceBox::Lower), None);
    }
}
