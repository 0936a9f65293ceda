use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Files were dropped or picked; unsupported extensions are filtered out.
    FilesAdded(Vec<PathBuf>),
    /// User removed the files at these list positions.
    FilesRemoved(Vec<usize>),
    /// User cleared the file list.
    FilesCleared,
    /// Scale mode, parameters or auto-convert flag changed.
    SettingsChanged(crate::ScaleSettings),
    /// User pressed Convert: submit the current list with the current settings.
    ConvertClicked,
    /// Submit an explicit request, bypassing the file list.
    SubmitBatch(crate::ResizeRequest),
    /// User asked to stop the running batch.
    CancelClicked,
    /// A dispatched unit finished its chunk.
    ChunkDone {
        batch_id: crate::BatchId,
        chunk_index: usize,
        converted: usize,
        failures: Vec<crate::FileFailure>,
    },
}
