//! The built-in operand table: the names of enumerant values, and the operands some of
//! them bring with them.

use super::{
  OperandDesc, OperandTable, enumerant, EnumerantKind,
  LITERAL_NUMBER, LITERAL_STRING
};

lazy_static! {
  pub(super) static ref BUILTIN_OPERANDS: OperandTable = {
    use EnumerantKind::*;

    let mut table = OperandTable::new();

    table.insert_all(SourceLanguage, &[
      ("Unknown", 0), ("ESSL", 1), ("GLSL", 2), ("OpenCL_C", 3), ("OpenCL_CPP", 4)
    ]);
    table.insert_all(ExecutionModel, &[
      ("Vertex", 0), ("TessellationControl", 1), ("TessellationEvaluation", 2),
      ("Geometry", 3), ("Fragment", 4), ("GLCompute", 5), ("Kernel", 6)
    ]);
    table.insert_all(AddressingModel, &[
      ("Logical", 0), ("Physical32", 1), ("Physical64", 2)
    ]);
    table.insert_all(MemoryModel, &[
      ("Simple", 0), ("GLSL450", 1), ("OpenCL", 2)
    ]);

    table.insert_all(ExecutionMode, &[
      ("SpacingEqual", 1), ("SpacingFractionalEven", 2), ("SpacingFractionalOdd", 3),
      ("VertexOrderCw", 4), ("VertexOrderCcw", 5), ("PixelCenterInteger", 6),
      ("OriginUpperLeft", 7), ("OriginLowerLeft", 8), ("EarlyFragmentTests", 9),
      ("PointMode", 10), ("Xfb", 11), ("DepthReplacing", 12), ("DepthGreater", 14),
      ("DepthLess", 15), ("DepthUnchanged", 16), ("InputPoints", 19), ("Triangles", 22),
      ("Quads", 24), ("Isolines", 25), ("OutputPoints", 27), ("OutputLineStrip", 28),
      ("OutputTriangleStrip", 29), ("ContractionOff", 31)
    ]);
    table.insert(OperandDesc::with_extra(ExecutionMode, "Invocations", 0, &[LITERAL_NUMBER]));
    table.insert(OperandDesc::with_extra(
      ExecutionMode, "LocalSize", 17, &[LITERAL_NUMBER, LITERAL_NUMBER, LITERAL_NUMBER]
    ));
    table.insert(OperandDesc::with_extra(
      ExecutionMode, "LocalSizeHint", 18, &[LITERAL_NUMBER, LITERAL_NUMBER, LITERAL_NUMBER]
    ));
    table.insert(OperandDesc::with_extra(ExecutionMode, "OutputVertices", 26, &[LITERAL_NUMBER]));
    table.insert(OperandDesc::with_extra(ExecutionMode, "VecTypeHint", 30, &[LITERAL_NUMBER]));

    table.insert_all(Capability, &[
      ("Matrix", 0), ("Shader", 1), ("Geometry", 2), ("Tessellation", 3), ("Addresses", 4),
      ("Linkage", 5), ("Kernel", 6), ("Vector16", 7), ("Float16Buffer", 8), ("Float16", 9),
      ("Float64", 10), ("Int64", 11), ("Int64Atomics", 12), ("ImageBasic", 13),
      ("ImageReadWrite", 14), ("ImageMipmap", 15), ("Pipes", 17), ("Groups", 18),
      ("DeviceEnqueue", 19), ("LiteralSampler", 20), ("AtomicStorage", 21), ("Int16", 22),
      ("TessellationPointSize", 23), ("GeometryPointSize", 24), ("ImageGatherExtended", 25),
      ("StorageImageMultisample", 27), ("UniformBufferArrayDynamicIndexing", 28),
      ("SampledImageArrayDynamicIndexing", 29), ("StorageBufferArrayDynamicIndexing", 30),
      ("StorageImageArrayDynamicIndexing", 31), ("ClipDistance", 32), ("CullDistance", 33),
      ("ImageCubeArray", 34), ("SampleRateShading", 35), ("ImageRect", 36),
      ("SampledRect", 37), ("GenericPointer", 38), ("Int8", 39)
    ]);

    table.insert_all(StorageClass, &[
      ("UniformConstant", 0), ("Input", 1), ("Uniform", 2), ("Output", 3), ("Workgroup", 4),
      ("CrossWorkgroup", 5), ("Private", 6), ("Function", 7), ("Generic", 8),
      ("PushConstant", 9), ("AtomicCounter", 10), ("Image", 11)
    ]);
    table.insert_all(Dimensionality, &[
      ("1D", 0), ("2D", 1), ("3D", 2), ("Cube", 3), ("Rect", 4), ("Buffer", 5),
      ("SubpassData", 6)
    ]);
    table.insert_all(SamplerAddressingMode, &[
      ("None", 0), ("ClampToEdge", 1), ("Clamp", 2), ("Repeat", 3), ("RepeatMirrored", 4)
    ]);
    table.insert_all(SamplerFilterMode, &[
      ("Nearest", 0), ("Linear", 1)
    ]);
    table.insert_all(FpFastMathMode, &[
      ("None", 0), ("NotNaN", 0x1), ("NotInf", 0x2), ("NSZ", 0x4), ("AllowRecip", 0x8),
      ("Fast", 0x10)
    ]);
    table.insert_all(FpRoundingMode, &[
      ("RTE", 0), ("RTZ", 1), ("RTP", 2), ("RTN", 3)
    ]);
    table.insert_all(LinkageType, &[
      ("Export", 0), ("Import", 1)
    ]);
    table.insert_all(AccessQualifier, &[
      ("ReadOnly", 0), ("WriteOnly", 1), ("ReadWrite", 2)
    ]);
    table.insert_all(FunctionParameterAttribute, &[
      ("Zext", 0), ("Sext", 1), ("ByVal", 2), ("Sret", 3), ("NoAlias", 4), ("NoCapture", 5),
      ("NoWrite", 6), ("NoReadWrite", 7)
    ]);

    table.insert_all(Decoration, &[
      ("RelaxedPrecision", 0), ("Block", 2), ("BufferBlock", 3), ("RowMajor", 4),
      ("ColMajor", 5), ("GLSLShared", 8), ("GLSLPacked", 9), ("CPacked", 10),
      ("NoPerspective", 13), ("Flat", 14), ("Patch", 15), ("Centroid", 16), ("Sample", 17),
      ("Invariant", 18), ("Restrict", 19), ("Aliased", 20), ("Volatile", 21),
      ("Constant", 22), ("Coherent", 23), ("NonWritable", 24), ("NonReadable", 25),
      ("Uniform", 26), ("SaturatedConversion", 28), ("NoContraction", 42)
    ]);
    for (name, value) in &[
      ("SpecId", 1), ("ArrayStride", 6), ("MatrixStride", 7), ("Stream", 29),
      ("Location", 30), ("Component", 31), ("Index", 32), ("Binding", 33),
      ("DescriptorSet", 34), ("Offset", 35), ("XfbBuffer", 36), ("XfbStride", 37),
      ("InputAttachmentIndex", 43), ("Alignment", 44)
    ] {
      table.insert(OperandDesc::with_extra(Decoration, *name, *value, &[LITERAL_NUMBER]));
    }
    table.insert(OperandDesc::with_extra(Decoration, "BuiltIn", 11, &[enumerant(BuiltIn)]));
    table.insert(OperandDesc::with_extra(
      Decoration, "FuncParamAttr", 38, &[enumerant(FunctionParameterAttribute)]
    ));
    table.insert(OperandDesc::with_extra(
      Decoration, "FPRoundingMode", 39, &[enumerant(FpRoundingMode)]
    ));
    table.insert(OperandDesc::with_extra(
      Decoration, "FPFastMathMode", 40, &[enumerant(FpFastMathMode)]
    ));
    table.insert(OperandDesc::with_extra(
      Decoration, "LinkageAttributes", 41, &[LITERAL_STRING, enumerant(LinkageType)]
    ));

    table.insert_all(BuiltIn, &[
      ("Position", 0), ("PointSize", 1), ("ClipDistance", 3), ("CullDistance", 4),
      ("VertexId", 5), ("InstanceId", 6), ("PrimitiveId", 7), ("InvocationId", 8),
      ("Layer", 9), ("ViewportIndex", 10), ("TessLevelOuter", 11), ("TessLevelInner", 12),
      ("TessCoord", 13), ("PatchVertices", 14), ("FragCoord", 15), ("PointCoord", 16),
      ("FrontFacing", 17), ("SampleId", 18), ("SamplePosition", 19), ("SampleMask", 20),
      ("FragDepth", 22), ("HelperInvocation", 23), ("NumWorkgroups", 24),
      ("WorkgroupSize", 25), ("WorkgroupId", 26), ("LocalInvocationId", 27),
      ("GlobalInvocationId", 28), ("LocalInvocationIndex", 29), ("VertexIndex", 42),
      ("InstanceIndex", 43)
    ]);

    // Masks. Only single bits and `None` are named; combined masks are not registered.
    table.insert_all(SelectionControl, &[
      ("None", 0), ("Flatten", 0x1), ("DontFlatten", 0x2)
    ]);
    table.insert_all(LoopControl, &[
      ("None", 0), ("Unroll", 0x1), ("DontUnroll", 0x2)
    ]);
    table.insert_all(FunctionControl, &[
      ("None", 0), ("Inline", 0x1), ("DontInline", 0x2), ("Pure", 0x4), ("Const", 0x8)
    ]);
    table.insert_all(MemorySemantics, &[
      ("None", 0), ("Acquire", 0x2), ("Release", 0x4), ("AcquireRelease", 0x8),
      ("SequentiallyConsistent", 0x10), ("UniformMemory", 0x40), ("SubgroupMemory", 0x80),
      ("WorkgroupMemory", 0x100), ("CrossWorkgroupMemory", 0x200),
      ("AtomicCounterMemory", 0x400), ("ImageMemory", 0x800)
    ]);
    table.insert_all(MemoryAccess, &[
      ("None", 0), ("Volatile", 0x1), ("Nontemporal", 0x4)
    ]);
    table.insert(OperandDesc::with_extra(MemoryAccess, "Aligned", 0x2, &[LITERAL_NUMBER]));

    table.insert_all(ExecutionScope, &[
      ("CrossDevice", 0), ("Device", 1), ("Workgroup", 2), ("Subgroup", 3), ("Invocation", 4)
    ]);
    table.insert_all(GroupOperation, &[
      ("Reduce", 0), ("InclusiveScan", 1), ("ExclusiveScan", 2)
    ]);
    table.insert_all(KernelEnqueueFlags, &[
      ("NoWait", 0), ("WaitKernel", 1), ("WaitWorkGroup", 2)
    ]);
    table.insert_all(KernelProfilingInfo, &[
      ("None", 0), ("CmdExecTime", 0x1)
    ]);

    table
  };
}
